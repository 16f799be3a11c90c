//! Shared fixtures for handler and middleware tests.

use actix_web::web;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::auth::{AuthProvider, AuthProviderType, LocalProvider};
use crate::config::Config;
use crate::db::Database;
use crate::pages::Views;
use crate::store::memory::MemoryStore;
use crate::store::StoreType;
use crate::utils::password::hash_password;
use crate::AppState;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
const SESSION_SECRET: &str = "test-session-secret";

// Hashing is slow in debug builds; do it once per test binary
static ADMIN_PASSWORD_HASH: Lazy<String> =
    Lazy::new(|| hash_password(ADMIN_PASSWORD).expect("hash admin password"));

pub fn test_config() -> Config {
    Config {
        content_store: StoreType::Memory,
        auth_provider: AuthProviderType::Local,
        admin_email: Some(ADMIN_EMAIL.to_string()),
        admin_password_hash: Some(ADMIN_PASSWORD_HASH.clone()),
        session_secret: Some(SESSION_SECRET.to_string()),
        session_expires_in: "1h".to_string(),
        ..Config::default()
    }
}

/// App state over an empty memory store with local admin auth.
pub fn local_state() -> web::Data<AppState> {
    let config = test_config();
    let auth: Arc<dyn AuthProvider> = Arc::new(LocalProvider::new(
        ADMIN_EMAIL.to_string(),
        ADMIN_PASSWORD_HASH.clone(),
        SESSION_SECRET.to_string(),
        config.session_expires_in.clone(),
    ));

    web::Data::new(AppState {
        db: Database::new(Arc::new(MemoryStore::new())),
        config,
        auth,
        http: reqwest::Client::new(),
        views: Arc::new(Views::new().expect("templates compile")),
    })
}

pub async fn sign_in_token(state: &web::Data<AppState>) -> String {
    state
        .auth
        .sign_in(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("admin sign-in")
        .access_token
}
