use actix_web::{
    http::{header, StatusCode},
    web, HttpRequest, HttpResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use validator::Validate;

use super::see_other;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::LOGIN_PATH;
use crate::models::SigninRequest;
use crate::utils::auth::{clear_session_cookie, session_cookie, session_token};
use crate::AppState;

pub const DEFAULT_AFTER_LOGIN: &str = "/admin/home";

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(LOGIN_PATH)
            .route(web::get().to(login_page))
            .route(web::post().to(login)),
    )
    .route("/logout", web::post().to(logout));
}

/// Post-login destination; only paths inside the admin area are honoured.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(next) if next.starts_with("/admin") => next,
        _ => DEFAULT_AFTER_LOGIN,
    }
}

fn login_error_message(e: &AppError) -> String {
    match e {
        AppError::Validation(message) => message.clone(),
        AppError::InvalidCredentials => "Invalid login credentials".to_string(),
        _ => "Login failed. Please try again.".to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

async fn login_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<LoginQuery>,
) -> AppResult<HttpResponse> {
    let next = safe_next(query.next.as_deref());

    // Already signed in
    if let Some(token) = session_token(&req) {
        if state.auth.get_user(&token).await.is_ok() {
            return Ok(see_other(next));
        }
    }

    state.views.page("login", &json!({ "next": next }))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

async fn login(state: web::Data<AppState>, form: web::Form<LoginForm>) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let next = safe_next(form.next.as_deref()).to_string();
    let request = SigninRequest {
        email: form.email.trim().to_string(),
        password: form.password,
    };

    let result = match request.validate() {
        Ok(()) => state.auth.sign_in(&request.email, &request.password).await,
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(session) => {
            let cookie = session_cookie(
                &session.access_token,
                session.expires_at,
                state.config.session_cookie_secure,
            );
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, next))
                .cookie(cookie)
                .finish())
        }
        Err(e) => {
            warn!("Login failed for {}: {}", request.email, e);
            state.views.page_with_status(
                StatusCode::UNAUTHORIZED,
                "login",
                &json!({
                    "error": login_error_message(&e),
                    "next": next,
                    "email": request.email,
                }),
            )
        }
    }
}

async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(token) = session_token(&req) {
        match state.auth.sign_out(&token).await {
            Ok(()) => info!("Admin signed out"),
            Err(e) => warn!("Sign-out with {} failed: {}", state.auth.name(), e),
        }
    }

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LOGIN_PATH))
        .cookie(clear_session_cookie())
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{local_state, sign_in_token, ADMIN_EMAIL, ADMIN_PASSWORD};
    use crate::utils::auth::SESSION_COOKIE;
    use actix_web::{cookie::Cookie, test as actix_test, App};

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next(Some("/admin/projects")), "/admin/projects");
        assert_eq!(safe_next(Some("https://evil.example")), DEFAULT_AFTER_LOGIN);
        assert_eq!(safe_next(None), DEFAULT_AFTER_LOGIN);
    }

    #[actix_web::test]
    async fn test_login_sets_cookie_and_redirects() {
        let state = local_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(create_routes),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/login")
            .set_form([
                ("email", ADMIN_EMAIL),
                ("password", ADMIN_PASSWORD),
                ("next", "/admin/timeline"),
            ])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/admin/timeline");
        assert!(resp
            .response()
            .cookies()
            .any(|c| c.name() == SESSION_COOKIE && !c.value().is_empty()));
    }

    #[actix_web::test]
    async fn test_wrong_password_rerenders_form() {
        let state = local_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(create_routes),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/login")
            .set_form([("email", ADMIN_EMAIL), ("password", "wrong")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = actix_test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Invalid login credentials"));
        assert!(html.contains(ADMIN_EMAIL));
    }

    #[actix_web::test]
    async fn test_signed_in_login_page_redirects() {
        let state = local_state();
        let token = sign_in_token(&state).await;
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(create_routes),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/login")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), DEFAULT_AFTER_LOGIN);
    }

    #[actix_web::test]
    async fn test_logout_clears_cookie() {
        let state = local_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(create_routes),
        )
        .await;

        let req = actix_test::TestRequest::post().uri("/logout").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), LOGIN_PATH);
        assert!(resp
            .response()
            .cookies()
            .any(|c| c.name() == SESSION_COOKIE && c.value().is_empty()));
    }
}
