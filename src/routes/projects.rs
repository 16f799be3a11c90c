use actix_web::{web, HttpResponse};

use crate::error::AppResult;
use crate::middleware::{AdminSession, SessionGate};
use crate::models::ProjectForm;
use crate::services::ProjectService;
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .wrap(SessionGate::reject_writes())
            .route(web::get().to(get_projects))
            .route(web::post().to(save_project)),
    )
    .service(
        web::resource("/{id}")
            .wrap(SessionGate::reject_writes())
            .route(web::get().to(get_project_by_id))
            .route(web::delete().to(delete_project_by_id)),
    );
}

async fn get_projects(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let projects = ProjectService::new(&state.db).list().await?;
    Ok(HttpResponse::Ok().json(projects))
}

async fn get_project_by_id(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let project = ProjectService::new(&state.db).get(&id).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// Creates a project, or updates it when the body carries an id; answers with the fresh list.
async fn save_project(
    state: web::Data<AppState>,
    session: AdminSession,
    form_data: web::Json<ProjectForm>,
) -> AppResult<HttpResponse> {
    let projects = ProjectService::new(&state.db)
        .with_token(&session.token)
        .save(form_data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(projects))
}

async fn delete_project_by_id(
    state: web::Data<AppState>,
    session: AdminSession,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let projects = ProjectService::new(&state.db)
        .with_token(&session.token)
        .delete(&id)
        .await?;

    Ok(HttpResponse::Ok().json(projects))
}
