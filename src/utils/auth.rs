use crate::error::{AppError, AppResult};
use crate::models::Claims;
use actix_web::{
    cookie::{Cookie, SameSite},
    http::header,
    HttpRequest,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

pub const SESSION_COOKIE: &str = "token";

pub fn create_jwt(user_id: &str, email: &str, secret: &str, expires_in: &str) -> AppResult<(String, i64)> {
    let expiration = parse_duration(expires_in)?;
    let exp = Utc::now()
        .checked_add_signed(expiration)
        .ok_or_else(|| AppError::InternalServerError("Invalid expiration time".to_string()))?
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp,
        iat: Utc::now().timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, exp))
}

pub fn verify_jwt(token: &str, secret: &str) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

pub fn parse_duration(duration_str: &str) -> AppResult<Duration> {
    let duration_str = duration_str.trim();

    let (amount, unit): (&str, fn(i64) -> Option<Duration>) =
        if let Some(hours) = duration_str.strip_suffix('h') {
            (hours, Duration::try_hours)
        } else if let Some(days) = duration_str.strip_suffix('d') {
            (days, Duration::try_days)
        } else if let Some(minutes) = duration_str.strip_suffix('m') {
            (minutes, Duration::try_minutes)
        } else {
            // Default to hours
            (duration_str, Duration::try_hours)
        };

    let amount: i64 = amount
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid duration format".to_string()))?;
    unit(amount).ok_or_else(|| AppError::BadRequest("Duration out of range".to_string()))
}

pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    auth_header
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Session token from the Authorization header, falling back to the session cookie.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .or_else(|| {
            req.cookie(SESSION_COOKIE)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        })
}

pub fn session_cookie(token: &str, expires_at: Option<i64>, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token.to_string());
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    cookie.set_path("/");

    if let Some(exp) = expires_at {
        cookie.set_expires(time::OffsetDateTime::from_unix_timestamp(exp).ok());
    }

    cookie
}

pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::seconds(-1));
    cookie
}
