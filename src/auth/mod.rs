pub mod gotrue;
pub mod local;

pub use gotrue::GoTrueProvider;
pub use local::LocalProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Session, SessionUser};

/// Issues and checks admin sessions.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange an email/password pair for a session.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Resolve the user behind a session token; fails when the token is no longer valid.
    async fn get_user(&self, token: &str) -> AppResult<SessionUser>;

    async fn sign_out(&self, token: &str) -> AppResult<()>;

    fn name(&self) -> &'static str;
}

/// Supported auth providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProviderType {
    GoTrue,
    Local,
}

impl AuthProviderType {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "gotrue" | "supabase" => Ok(AuthProviderType::GoTrue),
            "local" => Ok(AuthProviderType::Local),
            _ => Err(format!(
                "Unsupported AUTH_PROVIDER: {}. Supported providers: gotrue, local",
                s
            )),
        }
    }
}

pub struct AuthFactory;

impl AuthFactory {
    pub fn create(config: &Config, client: reqwest::Client) -> AppResult<Arc<dyn AuthProvider>> {
        info!("Creating auth provider: {:?}", config.auth_provider);

        match config.auth_provider {
            AuthProviderType::GoTrue => {
                let (url, key) = config
                    .supabase_url
                    .as_deref()
                    .zip(config.supabase_anon_key.as_deref())
                    .ok_or_else(|| {
                        AppError::InternalServerError(
                            "SUPABASE_URL and SUPABASE_ANON_KEY are required for gotrue auth"
                                .to_string(),
                        )
                    })?;
                Ok(Arc::new(GoTrueProvider::new(client, url, key)))
            }
            AuthProviderType::Local => {
                let missing = |name: &str| {
                    AppError::InternalServerError(format!("{} is required for local auth", name))
                };
                let email = config
                    .admin_email
                    .clone()
                    .ok_or_else(|| missing("ADMIN_EMAIL"))?;
                let hash = config
                    .admin_password_hash
                    .clone()
                    .ok_or_else(|| missing("ADMIN_PASSWORD_HASH"))?;
                let secret = config
                    .session_secret
                    .clone()
                    .ok_or_else(|| missing("SESSION_SECRET"))?;

                Ok(Arc::new(LocalProvider::new(
                    email,
                    hash,
                    secret,
                    config.session_expires_in.clone(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_from_str() {
        assert_eq!(AuthProviderType::from_str("gotrue").unwrap(), AuthProviderType::GoTrue);
        assert_eq!(AuthProviderType::from_str("Supabase").unwrap(), AuthProviderType::GoTrue);
        assert_eq!(AuthProviderType::from_str("LOCAL").unwrap(), AuthProviderType::Local);
        assert!(AuthProviderType::from_str("oauth").is_err());
    }

    #[test]
    fn test_factory_builds_local_provider() {
        let config = Config {
            auth_provider: AuthProviderType::Local,
            admin_email: Some("admin@example.com".to_string()),
            admin_password_hash: Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string()),
            session_secret: Some("secret".to_string()),
            ..Config::default()
        };
        let provider = AuthFactory::create(&config, reqwest::Client::new()).unwrap();
        assert_eq!(provider.name(), "local");
    }

    #[test]
    fn test_factory_requires_hosted_credentials() {
        assert!(AuthFactory::create(&Config::default(), reqwest::Client::new()).is_err());
    }
}
