use serde::{Deserialize, Serialize};
use std::env;

use crate::auth::AuthProviderType;
use crate::store::StoreType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // Content store
    pub content_store: StoreType,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub request_timeout_secs: u64,

    // Auth
    pub auth_provider: AuthProviderType,
    pub admin_email: Option<String>,
    pub admin_password_hash: Option<String>,
    pub session_secret: Option<String>,
    pub session_expires_in: String,
    pub session_cookie_secure: bool,

    // HTTP
    pub cors_allow_origin: String,
    pub enable_csp: bool,

    // About page
    pub github_username: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,

            content_store: StoreType::Postgrest,
            supabase_url: None,
            supabase_anon_key: None,
            request_timeout_secs: 30,

            auth_provider: AuthProviderType::GoTrue,
            admin_email: None,
            admin_password_hash: None,
            session_secret: None,
            session_expires_in: "7d".to_string(),
            session_cookie_secure: false,

            cors_allow_origin: "*".to_string(),
            enable_csp: false,

            github_username: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|e| format!("Invalid PORT: {}", e))?;
        }

        if let Some(store) = lookup("CONTENT_STORE") {
            config.content_store = StoreType::from_str(&store).map_err(|e| e.to_string())?;
        }

        config.supabase_url = lookup("SUPABASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        config.supabase_anon_key = lookup("SUPABASE_ANON_KEY").filter(|key| !key.is_empty());

        if let Some(timeout) = lookup("REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout
                .parse()
                .map_err(|e| format!("Invalid REQUEST_TIMEOUT_SECS: {}", e))?;
        }

        if let Some(provider) = lookup("AUTH_PROVIDER") {
            config.auth_provider =
                AuthProviderType::from_str(&provider).map_err(|e| e.to_string())?;
        }

        config.admin_email = lookup("ADMIN_EMAIL").map(|email| email.trim().to_lowercase());
        config.admin_password_hash = lookup("ADMIN_PASSWORD_HASH");
        config.session_secret = lookup("SESSION_SECRET");

        if let Some(expires_in) = lookup("SESSION_EXPIRES_IN") {
            crate::utils::auth::parse_duration(&expires_in)
                .map_err(|_| format!("Invalid SESSION_EXPIRES_IN: {}", expires_in))?;
            config.session_expires_in = expires_in;
        }

        if let Some(secure) = lookup("SESSION_COOKIE_SECURE") {
            config.session_cookie_secure = secure
                .parse()
                .map_err(|e| format!("Invalid SESSION_COOKIE_SECURE: {}", e))?;
        }

        if let Some(origin) = lookup("CORS_ALLOW_ORIGIN") {
            config.cors_allow_origin = origin;
        }

        if let Some(csp) = lookup("ENABLE_CSP") {
            config.enable_csp = csp
                .to_lowercase()
                .parse()
                .map_err(|e| format!("Invalid ENABLE_CSP: {}", e))?;
        }

        config.github_username = lookup("GITHUB_USERNAME").filter(|name| !name.is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Checks that the selected store and auth provider have their credentials.
    pub fn validate(&self) -> Result<(), String> {
        let needs_supabase = self.content_store == StoreType::Postgrest
            || self.auth_provider == AuthProviderType::GoTrue;

        if needs_supabase {
            if self.supabase_url.is_none() {
                return Err("SUPABASE_URL is required for the postgrest store and gotrue auth".to_string());
            }
            if self.supabase_anon_key.is_none() {
                return Err(
                    "SUPABASE_ANON_KEY is required for the postgrest store and gotrue auth".to_string(),
                );
            }
        }

        if self.auth_provider == AuthProviderType::Local {
            if self.admin_email.is_none() {
                return Err("ADMIN_EMAIL is required for local auth".to_string());
            }
            if self.admin_password_hash.is_none() {
                return Err("ADMIN_PASSWORD_HASH is required for local auth".to_string());
            }
            if self.session_secret.as_deref().map_or(true, str::is_empty) {
                return Err("SESSION_SECRET is required for local auth".to_string());
            }
        }

        Ok(())
    }
}
