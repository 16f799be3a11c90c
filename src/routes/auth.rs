use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::{AdminSession, SessionGate};
use crate::models::SigninRequest;
use crate::utils::auth::{clear_session_cookie, session_cookie};
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/signin").route(web::post().to(signin)))
        .service(
            web::resource("/signout")
                .wrap(SessionGate::reject())
                .route(web::post().to(signout)),
        )
        .service(
            web::resource("/session")
                .wrap(SessionGate::reject())
                .route(web::get().to(get_session)),
        );
}

async fn signin(
    state: web::Data<AppState>,
    form_data: web::Json<SigninRequest>,
) -> AppResult<HttpResponse> {
    form_data.validate()?;

    let session = state
        .auth
        .sign_in(&form_data.email, &form_data.password)
        .await?;
    let cookie = session_cookie(
        &session.access_token,
        session.expires_at,
        state.config.session_cookie_secure,
    );

    Ok(HttpResponse::Ok().cookie(cookie).json(session))
}

async fn signout(state: web::Data<AppState>, session: AdminSession) -> AppResult<HttpResponse> {
    state.auth.sign_out(&session.token).await?;
    tracing::info!("Admin signed out: {}", session.email);

    Ok(HttpResponse::Ok()
        .cookie(clear_session_cookie())
        .json(json!({ "status": true })))
}

async fn get_session(session: AdminSession) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({ "user": session.user })))
}
