use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::AuthProvider;
use crate::error::{AppError, AppResult};
use crate::models::{Session, SessionUser};

/// Hosted auth API in the GoTrue dialect (`{url}/auth/v1`).
pub struct GoTrueProvider {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: UserResponse,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// The API has used several error shapes over time.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

impl From<UserResponse> for SessionUser {
    fn from(user: UserResponse) -> Self {
        SessionUser {
            id: user.id,
            email: user.email.unwrap_or_default(),
        }
    }
}

impl From<TokenResponse> for Session {
    fn from(token: TokenResponse) -> Self {
        let expires_at = token
            .expires_at
            .or_else(|| token.expires_in.map(|secs| Utc::now().timestamp() + secs));

        Session {
            access_token: token.access_token,
            token_type: token.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_at,
            user: token.user.into(),
        }
    }
}

impl GoTrueProvider {
    pub fn new(client: reqwest::Client, base_url: &str, anon_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn error_message(response: reqwest::Response) -> (StatusCode, String) {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| status.to_string());
        (status, message)
    }
}

#[async_trait]
impl AuthProvider for GoTrueProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let response = self
            .client
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, message) = Self::error_message(response).await;
            warn!("Sign-in rejected ({}): {}", status, message);
            return match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
                    Err(AppError::InvalidCredentials)
                }
                _ => Err(AppError::Backend(message)),
            };
        }

        let token: TokenResponse = response.json().await?;
        info!("Admin signed in: {}", token.user.email.as_deref().unwrap_or(&token.user.id));
        Ok(token.into())
    }

    async fn get_user(&self, token: &str) -> AppResult<SessionUser> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: UserResponse = response.json().await?;
                Ok(user.into())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let (_, message) = Self::error_message(response).await;
                debug!("Session rejected: {}", message);
                Err(AppError::Unauthorized("Session is no longer valid".to_string()))
            }
            _ => {
                let (_, message) = Self::error_message(response).await;
                Err(AppError::Backend(message))
            }
        }
    }

    async fn sign_out(&self, token: &str) -> AppResult<()> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            // Already expired upstream; the local cookie is cleared either way
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(()),
            _ => {
                let (_, message) = Self::error_message(response).await;
                Err(AppError::Backend(message))
            }
        }
    }

    fn name(&self) -> &'static str {
        "gotrue"
    }
}
