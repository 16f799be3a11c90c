use async_trait::async_trait;
use tracing::{info, warn};

use super::AuthProvider;
use crate::error::{AppError, AppResult};
use crate::models::{Session, SessionUser};
use crate::utils::auth::{create_jwt, verify_jwt};
use crate::utils::password::verify_password;

/// Subject used for the single configured admin.
const ADMIN_SUBJECT: &str = "admin";

/// Single admin account from configuration, with stateless HS256 sessions.
pub struct LocalProvider {
    admin_email: String,
    password_hash: String,
    secret: String,
    expires_in: String,
}

impl LocalProvider {
    pub fn new(admin_email: String, password_hash: String, secret: String, expires_in: String) -> Self {
        Self {
            admin_email: admin_email.trim().to_lowercase(),
            password_hash,
            secret,
            expires_in,
        }
    }
}

#[async_trait]
impl AuthProvider for LocalProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let email = email.trim().to_lowercase();

        // Hash is checked even when the email does not match
        let password_ok = verify_password(password, &self.password_hash)?;
        if email != self.admin_email || !password_ok {
            warn!("Rejected sign-in for {}", email);
            return Err(AppError::InvalidCredentials);
        }

        let (token, expires_at) =
            create_jwt(ADMIN_SUBJECT, &self.admin_email, &self.secret, &self.expires_in)?;
        info!("Admin signed in: {}", self.admin_email);

        Ok(Session {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_at: Some(expires_at),
            user: SessionUser {
                id: ADMIN_SUBJECT.to_string(),
                email: self.admin_email.clone(),
            },
        })
    }

    async fn get_user(&self, token: &str) -> AppResult<SessionUser> {
        let claims = verify_jwt(token, &self.secret)?;
        if claims.email != self.admin_email {
            return Err(AppError::Unauthorized("Session is no longer valid".to_string()));
        }

        Ok(SessionUser {
            id: claims.sub,
            email: claims.email,
        })
    }

    async fn sign_out(&self, _token: &str) -> AppResult<()> {
        // Tokens are stateless; dropping the cookie ends the session.
        Ok(())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::password::hash_password;

    fn provider() -> LocalProvider {
        LocalProvider::new(
            "Admin@Example.com".to_string(),
            hash_password("correct horse").unwrap(),
            "test-secret".to_string(),
            "1h".to_string(),
        )
    }

    #[tokio::test]
    async fn test_sign_in_and_get_user() {
        let provider = provider();
        let session = provider.sign_in("admin@example.com", "correct horse").await.unwrap();
        assert_eq!(session.user.email, "admin@example.com");
        assert!(session.expires_at.is_some());

        let user = provider.get_user(&session.access_token).await.unwrap();
        assert_eq!(user.id, "admin");
    }

    #[tokio::test]
    async fn test_rejects_wrong_credentials() {
        let provider = provider();
        assert!(matches!(
            provider.sign_in("admin@example.com", "wrong").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            provider.sign_in("someone@example.com", "correct horse").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_rejects_foreign_tokens() {
        let provider = provider();
        let (token, _) = create_jwt("admin", "admin@example.com", "other-secret", "1h").unwrap();
        assert!(provider.get_user(&token).await.is_err());
        assert!(provider.get_user("garbage").await.is_err());
    }
}
