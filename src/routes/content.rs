use actix_web::{web, HttpResponse};

use crate::error::AppResult;
use crate::middleware::{AdminSession, SessionGate};
use crate::models::{AboutContent, HomeContent, SingletonDocument};
use crate::services::ContentService;
use crate::AppState;

pub fn create_home_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .wrap(SessionGate::reject_writes())
            .route(web::get().to(get_document::<HomeContent>))
            .route(web::put().to(save_document::<HomeContent>)),
    );
}

pub fn create_about_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .wrap(SessionGate::reject_writes())
            .route(web::get().to(get_document::<AboutContent>))
            .route(web::put().to(save_document::<AboutContent>)),
    );
}

/// Latest document, or empty fields when none has been saved yet.
async fn get_document<T: SingletonDocument + 'static>(
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let doc: T = ContentService::new(&state.db)
        .latest()
        .await?
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(doc))
}

async fn save_document<T: SingletonDocument + 'static>(
    state: web::Data<AppState>,
    session: AdminSession,
    doc: web::Json<T>,
) -> AppResult<HttpResponse> {
    let saved = ContentService::new(&state.db)
        .with_token(&session.token)
        .save(&doc.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(saved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{local_state, sign_in_token};
    use actix_web::{http::header, http::StatusCode, test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_home_upsert_round() {
        let state = local_state();
        let token = sign_in_token(&state).await;
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/home").configure(create_home_routes)),
        )
        .await;

        let req = test::TestRequest::get().uri("/home").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["intro_text"], "");
        assert!(body.get("id").is_none());

        let req = test::TestRequest::put()
            .uri("/home")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .set_json(json!({"intro_text": "Hi", "pages": [{"label": "Blog", "slug": "/blog"}]}))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri("/home")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .set_json(json!({"id": id, "intro_text": "Hello again", "pages": []}))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["id"], id.as_str());
        assert!(updated["updated_at"].is_string());

        let req = test::TestRequest::get().uri("/home").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["intro_text"], "Hello again");
    }

    #[actix_web::test]
    async fn test_anonymous_save_is_rejected() {
        let state = local_state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/about").configure(create_about_routes)),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/about")
            .set_json(json!({"name": "Mallory"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get().uri("/about").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "");
    }
}
