use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::{AdminSession, SessionGate};
use crate::models::{TimelineForm, TimelineKind};
use crate::services::TimelineService;
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .wrap(SessionGate::reject_writes())
            .route(web::get().to(get_timeline))
            .route(web::post().to(add_timeline_item)),
    )
    .service(
        web::resource("/{id}")
            .wrap(SessionGate::reject_writes())
            .route(web::delete().to(delete_timeline_item)),
    );
}

#[derive(Debug, Deserialize)]
pub struct TimelineQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

async fn get_timeline(
    state: web::Data<AppState>,
    query: web::Query<TimelineQuery>,
) -> AppResult<HttpResponse> {
    let service = TimelineService::new(&state.db);

    let items = match query.kind.as_deref() {
        Some(kind) => {
            let kind: TimelineKind = kind.parse().map_err(AppError::BadRequest)?;
            service.list_kind(kind).await?
        }
        None => service.list().await?,
    };

    Ok(HttpResponse::Ok().json(items))
}

async fn add_timeline_item(
    state: web::Data<AppState>,
    session: AdminSession,
    form_data: web::Json<TimelineForm>,
) -> AppResult<HttpResponse> {
    let items = TimelineService::new(&state.db)
        .with_token(&session.token)
        .add(form_data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(items))
}

async fn delete_timeline_item(
    state: web::Data<AppState>,
    session: AdminSession,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let items = TimelineService::new(&state.db)
        .with_token(&session.token)
        .delete(&id)
        .await?;

    Ok(HttpResponse::Ok().json(items))
}
