use actix_web::{
    http::{header, StatusCode},
    web, HttpRequest, HttpResponse, ResponseError,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{error, warn};

use super::nav::admin_menu;
use super::public::timeline_entries;
use super::see_other;
use crate::error::{AppError, AppResult};
use crate::middleware::{AdminSession, SessionGate};
use crate::models::{
    AboutContent, HomeContent, LoadState, PageLink, ProjectForm,
    ProjectFormInput, SaveStatus, TimelineForm, TimelineItem, UiSettings,
};
use crate::services::{ContentService, ProjectService, TimelineService};
use crate::utils::misc::empty_to_none;
use crate::AppState;

const ADMIN_HOME: &str = "/admin/home";
const ADMIN_PROJECTS: &str = "/admin/projects";
const ADMIN_TIMELINE: &str = "/admin/timeline";

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(SessionGate::redirect())
            .route("", web::get().to(dashboard))
            .service(
                web::resource("/home")
                    .route(web::get().to(home_editor))
                    .route(web::post().to(save_home)),
            )
            .service(
                web::resource("/about")
                    .route(web::get().to(about_editor))
                    .route(web::post().to(save_about)),
            )
            .service(
                web::resource("/projects")
                    .route(web::get().to(project_list))
                    .route(web::post().to(save_project)),
            )
            .route("/projects/new", web::get().to(new_project))
            .route("/projects/{id}/edit", web::get().to(edit_project))
            .route("/projects/{id}/delete", web::post().to(delete_project))
            .service(
                web::resource("/timeline")
                    .route(web::get().to(timeline_editor))
                    .route(web::post().to(add_timeline_item)),
            )
            .route("/timeline/{id}/delete", web::post().to(delete_timeline_item))
            .route("/ui/theme", web::post().to(toggle_theme))
            .route("/ui/sidebar", web::post().to(toggle_sidebar)),
    );
}

/// Everything the admin layout needs besides the page body.
struct AdminFrame<'a> {
    path: &'a str,
    session: &'a AdminSession,
    ui: UiSettings,
}

impl<'a> AdminFrame<'a> {
    fn new(req: &'a HttpRequest, session: &'a AdminSession, ui: UiSettings) -> Self {
        AdminFrame {
            path: req.path(),
            session,
            ui,
        }
    }

    fn context(&self, title: &str, status: SaveStatus, page: Value) -> Value {
        let mut context = json!({
            "title": title,
            "path": self.path,
            "user": self.session.user,
            "ui": self.ui,
            "nav": admin_menu(self.path),
            "status": status.as_str(),
            "status_message": status.message(),
        });

        if let (Some(context), Value::Object(page)) = (context.as_object_mut(), page) {
            context.extend(page);
        }
        context
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

impl StatusQuery {
    fn save_status(&self) -> SaveStatus {
        SaveStatus::from_query(self.status.as_deref())
    }
}

fn saved_redirect(path: &str, status: SaveStatus) -> HttpResponse {
    see_other(&format!("{}?status={}", path, status.as_str()))
}

async fn dashboard() -> HttpResponse {
    see_other(ADMIN_HOME)
}

/// Rebuilds the home document from the editor's indexed `label_N` / `slug_N` fields.
pub fn parse_home_form(fields: &HashMap<String, String>) -> HomeContent {
    let field = |name: &str| fields.get(name).map(|v| v.trim().to_string());

    let mut pages = Vec::new();
    for index in 0.. {
        let label = field(&format!("label_{}", index));
        let slug = field(&format!("slug_{}", index));
        if label.is_none() && slug.is_none() {
            break;
        }
        pages.push(PageLink {
            label: label.unwrap_or_default(),
            slug: slug.unwrap_or_default(),
        });
    }

    HomeContent {
        id: empty_to_none(fields.get("id").cloned()),
        intro_text: fields.get("intro_text").cloned().unwrap_or_default(),
        pages,
        ..Default::default()
    }
    .without_blank_pages()
}

async fn home_editor(
    state: web::Data<AppState>,
    req: HttpRequest,
    session: AdminSession,
    ui: UiSettings,
    query: web::Query<StatusQuery>,
) -> AppResult<HttpResponse> {
    let home = ContentService::new(&state.db).load::<HomeContent>().await;
    let loading = home.is_loading();
    let home = home.unwrap_or_default();

    // One spare row for adding a page
    let mut rows = home.pages.clone();
    rows.push(PageLink::default());

    let frame = AdminFrame::new(&req, &session, ui);
    state.views.page(
        "admin/home",
        &frame.context(
            "Home",
            query.save_status(),
            json!({ "loading": loading, "home": home, "rows": rows }),
        ),
    )
}

async fn save_home(
    state: web::Data<AppState>,
    session: AdminSession,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let home = parse_home_form(&form);
    let status = ContentService::new(&state.db)
        .with_token(&session.token)
        .save_status(&home)
        .await;

    saved_redirect(ADMIN_HOME, status)
}

#[derive(Debug, Default, Deserialize)]
pub struct AboutFormInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

impl From<AboutFormInput> for AboutContent {
    fn from(input: AboutFormInput) -> Self {
        AboutContent {
            id: empty_to_none(input.id),
            name: input.name,
            role: input.role,
            location: input.location,
            company: input.company,
            description: input.description,
            image_url: input.image_url,
            created_at: None,
        }
    }
}

async fn about_editor(
    state: web::Data<AppState>,
    req: HttpRequest,
    session: AdminSession,
    ui: UiSettings,
    query: web::Query<StatusQuery>,
) -> AppResult<HttpResponse> {
    let about = ContentService::new(&state.db).load::<AboutContent>().await;
    let loading = about.is_loading();

    let frame = AdminFrame::new(&req, &session, ui);
    state.views.page(
        "admin/about",
        &frame.context(
            "About",
            query.save_status(),
            json!({ "loading": loading, "about": about.unwrap_or_default() }),
        ),
    )
}

async fn save_about(
    state: web::Data<AppState>,
    session: AdminSession,
    form: web::Form<AboutFormInput>,
) -> HttpResponse {
    let about = AboutContent::from(form.into_inner());
    let status = ContentService::new(&state.db)
        .with_token(&session.token)
        .save_status(&about)
        .await;

    saved_redirect("/admin/about", status)
}

async fn project_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    session: AdminSession,
    ui: UiSettings,
) -> AppResult<HttpResponse> {
    let projects = match ProjectService::new(&state.db).list().await {
        Ok(projects) => LoadState::Loaded(projects),
        Err(e) => {
            warn!("Failed to load projects: {}", e);
            LoadState::Loading
        }
    };

    let frame = AdminFrame::new(&req, &session, ui);
    state.views.page(
        "admin/projects",
        &frame.context(
            "Projects",
            SaveStatus::Idle,
            json!({
                "loading": projects.is_loading(),
                "projects": projects.unwrap_or_default(),
            }),
        ),
    )
}

fn project_form_page(
    state: &AppState,
    frame: &AdminFrame<'_>,
    status: StatusCode,
    form: &ProjectForm,
    message: Option<&str>,
) -> AppResult<HttpResponse> {
    let title = if form.id().is_some() {
        "Edit Project"
    } else {
        "Add Project"
    };

    state.views.page_with_status(
        status,
        "admin/project_form",
        &frame.context(
            title,
            SaveStatus::Idle,
            json!({ "form": form, "error": message }),
        ),
    )
}

async fn new_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    session: AdminSession,
    ui: UiSettings,
) -> AppResult<HttpResponse> {
    let frame = AdminFrame::new(&req, &session, ui);
    project_form_page(&state, &frame, StatusCode::OK, &ProjectForm::default(), None)
}

async fn edit_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    session: AdminSession,
    ui: UiSettings,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let project = match ProjectService::new(&state.db).get(&id).await {
        Ok(project) => project,
        Err(e) => {
            warn!("Cannot edit project {}: {}", id, e);
            return Ok(see_other(ADMIN_PROJECTS));
        }
    };

    let frame = AdminFrame::new(&req, &session, ui);
    project_form_page(
        &state,
        &frame,
        StatusCode::OK,
        &ProjectForm::from(project),
        None,
    )
}

async fn save_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    session: AdminSession,
    ui: UiSettings,
    input: web::Form<ProjectFormInput>,
) -> AppResult<HttpResponse> {
    let form = ProjectForm::from(input.into_inner());
    let result = ProjectService::new(&state.db)
        .with_token(&session.token)
        .save(form.clone())
        .await;

    let message = match result {
        Ok(_) => return Ok(see_other(ADMIN_PROJECTS)),
        Err(AppError::Validation(message)) => message,
        Err(e) => {
            error!("Failed to save project: {}", e);
            return project_form_page(
                &state,
                &AdminFrame::new(&req, &session, ui),
                e.status_code(),
                &form,
                Some("Failed to save project."),
            );
        }
    };

    project_form_page(
        &state,
        &AdminFrame::new(&req, &session, ui),
        StatusCode::BAD_REQUEST,
        &form,
        Some(&message),
    )
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
}

impl DeleteForm {
    fn confirmed(&self) -> bool {
        self.confirm.as_deref() == Some("yes")
    }
}

#[derive(Serialize)]
struct ConfirmDelete<'a> {
    question: &'a str,
    subject: &'a str,
    action: String,
    cancel: &'a str,
}

async fn delete_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    session: AdminSession,
    ui: UiSettings,
    id: web::Path<String>,
    form: web::Form<DeleteForm>,
) -> AppResult<HttpResponse> {
    let service = ProjectService::new(&state.db).with_token(&session.token);

    if !form.confirmed() {
        let project = match service.get(&id).await {
            Ok(project) => project,
            Err(e) => {
                warn!("Cannot delete project {}: {}", id, e);
                return Ok(see_other(ADMIN_PROJECTS));
            }
        };

        let confirm = ConfirmDelete {
            question: "Delete this project?",
            subject: &project.title,
            action: format!("/admin/projects/{}/delete", project.id),
            cancel: ADMIN_PROJECTS,
        };
        let frame = AdminFrame::new(&req, &session, ui);
        return state.views.page(
            "admin/confirm_delete",
            &frame.context("Delete Project", SaveStatus::Idle, serde_json::to_value(confirm)?),
        );
    }

    if let Err(e) = service.delete(&id).await {
        error!("Failed to delete project {}: {}", id, e);
    }
    Ok(see_other(ADMIN_PROJECTS))
}

fn timeline_page(
    state: &AppState,
    frame: &AdminFrame<'_>,
    status: StatusCode,
    groups: LoadState<(Vec<TimelineItem>, Vec<TimelineItem>)>,
    form: &TimelineForm,
    message: Option<&str>,
) -> AppResult<HttpResponse> {
    let loading = groups.is_loading();
    let (experiences, organizations) = groups.unwrap_or_default();

    state.views.page_with_status(
        status,
        "admin/timeline",
        &frame.context(
            "Timeline",
            SaveStatus::Idle,
            json!({
                "loading": loading,
                "experiences": timeline_entries(&experiences),
                "organizations": timeline_entries(&organizations),
                "form": form,
                "error": message,
            }),
        ),
    )
}

async fn load_timeline(
    service: &TimelineService<'_>,
) -> LoadState<(Vec<TimelineItem>, Vec<TimelineItem>)> {
    match service.grouped().await {
        Ok(groups) => LoadState::Loaded(groups),
        Err(e) => {
            warn!("Failed to load timeline: {}", e);
            LoadState::Loading
        }
    }
}

async fn timeline_editor(
    state: web::Data<AppState>,
    req: HttpRequest,
    session: AdminSession,
    ui: UiSettings,
) -> AppResult<HttpResponse> {
    let groups = load_timeline(&TimelineService::new(&state.db)).await;
    let frame = AdminFrame::new(&req, &session, ui);
    timeline_page(
        &state,
        &frame,
        StatusCode::OK,
        groups,
        &TimelineForm::default(),
        None,
    )
}

async fn add_timeline_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    session: AdminSession,
    ui: UiSettings,
    form: web::Form<TimelineForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let service = TimelineService::new(&state.db).with_token(&session.token);

    let (status, message) = match service.add(form.clone()).await {
        Ok(_) => return Ok(see_other(ADMIN_TIMELINE)),
        Err(AppError::Validation(message)) => (StatusCode::BAD_REQUEST, message),
        Err(e) => {
            error!("Failed to add timeline item: {}", e);
            (e.status_code(), "Failed to add timeline item.".to_string())
        }
    };

    let groups = load_timeline(&service).await;
    let frame = AdminFrame::new(&req, &session, ui);
    timeline_page(&state, &frame, status, groups, &form, Some(&message))
}

async fn delete_timeline_item(
    state: web::Data<AppState>,
    session: AdminSession,
    id: web::Path<String>,
) -> HttpResponse {
    if let Err(e) = TimelineService::new(&state.db)
        .with_token(&session.token)
        .delete(&id)
        .await
    {
        error!("Failed to delete timeline item {}: {}", id, e);
    }
    see_other(ADMIN_TIMELINE)
}

#[derive(Debug, Default, Deserialize)]
pub struct BackForm {
    pub back: Option<String>,
}

impl BackForm {
    /// Page to return to after a toggle; stays inside the admin area.
    fn target(&self) -> &str {
        match self.back.as_deref() {
            Some(back) if back.starts_with("/admin") => back,
            _ => ADMIN_HOME,
        }
    }
}

async fn toggle_theme(ui: UiSettings, form: web::Form<BackForm>) -> HttpResponse {
    let ui = UiSettings {
        theme: ui.theme.toggled(),
        ..ui
    };

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, form.target()))
        .cookie(ui.theme_cookie())
        .finish()
}

async fn toggle_sidebar(ui: UiSettings, form: web::Form<BackForm>) -> HttpResponse {
    let ui = UiSettings {
        sidebar_expanded: !ui.sidebar_expanded,
        ..ui
    };

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, form.target()))
        .cookie(ui.sidebar_cookie())
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ui::THEME_COOKIE;
    use crate::models::Project;
    use crate::test_support::{local_state, sign_in_token};
    use crate::utils::auth::SESSION_COOKIE;
    use actix_web::{cookie::Cookie, dev::ServiceResponse, test as actix_test, App};

    macro_rules! admin_app {
        ($state:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data($state.clone())
                    .configure(create_routes),
            )
            .await
        };
    }

    fn location(resp: &ServiceResponse) -> &str {
        resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
    }

    async fn body_text(resp: ServiceResponse) -> String {
        String::from_utf8(actix_test::read_body(resp).await.to_vec()).unwrap()
    }

    #[test]
    fn test_parse_home_form_drops_blank_rows() {
        let fields: HashMap<String, String> = [
            ("id", "1"),
            ("intro_text", "Hi"),
            ("label_0", "Blog"),
            ("slug_0", "/blog"),
            ("label_1", " "),
            ("slug_1", ""),
            ("label_2", "Notes"),
            ("slug_2", "/notes"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let home = parse_home_form(&fields);
        assert_eq!(home.id.as_deref(), Some("1"));
        assert_eq!(home.intro_text, "Hi");
        let slugs: Vec<_> = home.pages.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["/blog", "/notes"]);
    }

    #[test]
    fn test_back_target_stays_in_admin() {
        let form = BackForm {
            back: Some("/admin/projects".to_string()),
        };
        assert_eq!(form.target(), "/admin/projects");

        let form = BackForm {
            back: Some("//evil.example".to_string()),
        };
        assert_eq!(form.target(), ADMIN_HOME);
    }

    #[actix_web::test]
    async fn test_every_admin_page_requires_session() {
        let state = local_state();
        let app = admin_app!(state);

        for uri in ["/admin/home", "/admin/about", "/admin/projects", "/admin/timeline"] {
            let req = actix_test::TestRequest::get().uri(uri).to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{}", uri);
            assert!(location(&resp).starts_with("/login?next="));
        }

        let req = actix_test::TestRequest::post()
            .uri("/admin/home")
            .set_form([("intro_text", "Hijacked")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let rows: Vec<HomeContent> = state.db.from("home_content").select().await.unwrap();
        assert!(rows.is_empty());
    }

    #[actix_web::test]
    async fn test_dashboard_redirects_to_home_editor() {
        let state = local_state();
        let token = sign_in_token(&state).await;
        let app = admin_app!(state);

        let req = actix_test::TestRequest::get()
            .uri("/admin")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), ADMIN_HOME);
    }

    #[actix_web::test]
    async fn test_home_save_inserts_then_updates() {
        let state = local_state();
        let token = sign_in_token(&state).await;
        let app = admin_app!(state);

        let req = actix_test::TestRequest::post()
            .uri("/admin/home")
            .cookie(Cookie::new(SESSION_COOKIE, token.clone()))
            .set_form([("id", ""), ("intro_text", "Hi"), ("label_0", "Blog"), ("slug_0", "/blog")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(location(&resp), "/admin/home?status=saved");

        let rows: Vec<HomeContent> = state.db.from("home_content").select().await.unwrap();
        assert_eq!(rows.len(), 1);
        let id = rows[0].id.clone().unwrap();

        let req = actix_test::TestRequest::post()
            .uri("/admin/home")
            .cookie(Cookie::new(SESSION_COOKIE, token.clone()))
            .set_form([("id", id.as_str()), ("intro_text", "Hello again")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(location(&resp), "/admin/home?status=saved");

        let rows: Vec<HomeContent> = state.db.from("home_content").select().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].intro_text, "Hello again");
        assert!(rows[0].pages.is_empty());

        let req = actix_test::TestRequest::get()
            .uri("/admin/home?status=saved")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let html = body_text(actix_test::call_service(&app, req).await).await;
        assert!(html.contains("Content saved successfully."));
        assert!(html.contains("Hello again"));
        assert!(html.contains(r#"name="label_0""#));
    }

    #[actix_web::test]
    async fn test_save_against_missing_row_reports_error() {
        let state = local_state();
        let token = sign_in_token(&state).await;
        let app = admin_app!(state);

        let req = actix_test::TestRequest::post()
            .uri("/admin/about")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .set_form([("id", "gone"), ("name", "Ada")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(location(&resp), "/admin/about?status=error");
    }

    #[actix_web::test]
    async fn test_project_requires_title_and_image() {
        let state = local_state();
        let token = sign_in_token(&state).await;
        let app = admin_app!(state);

        let req = actix_test::TestRequest::post()
            .uri("/admin/projects")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .set_form([("title", "  "), ("image_url", "https://img"), ("tech_stack", "Rust")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let html = body_text(resp).await;
        assert!(html.contains("Title and Image URL are required."));
        assert!(html.contains(r#"value="https://img""#));

        let rows: Vec<Project> = state.db.from("projects").select().await.unwrap();
        assert!(rows.is_empty());
    }

    #[actix_web::test]
    async fn test_project_delete_asks_first() {
        let state = local_state();
        let token = sign_in_token(&state).await;
        let app = admin_app!(state);

        let req = actix_test::TestRequest::post()
            .uri("/admin/projects")
            .cookie(Cookie::new(SESSION_COOKIE, token.clone()))
            .set_form([
                ("title", "Portfolio"),
                ("image_url", "https://img"),
                ("tech_stack", "Rust, actix"),
            ])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(location(&resp), ADMIN_PROJECTS);

        let rows: Vec<Project> = state.db.from("projects").select().await.unwrap();
        assert_eq!(rows[0].tech_stack, vec!["Rust", "actix"]);
        let uri = format!("/admin/projects/{}/delete", rows[0].id);

        let req = actix_test::TestRequest::post()
            .uri(&uri)
            .cookie(Cookie::new(SESSION_COOKIE, token.clone()))
            .set_form(Vec::<(String, String)>::new())
            .to_request();
        let html = body_text(actix_test::call_service(&app, req).await).await;
        assert!(html.contains("Delete this project?"));
        assert!(html.contains("Portfolio"));
        let rows: Vec<Project> = state.db.from("projects").select().await.unwrap();
        assert_eq!(rows.len(), 1);

        let req = actix_test::TestRequest::post()
            .uri(&uri)
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .set_form([("confirm", "yes")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(location(&resp), ADMIN_PROJECTS);
        let rows: Vec<Project> = state.db.from("projects").select().await.unwrap();
        assert!(rows.is_empty());
    }

    #[actix_web::test]
    async fn test_timeline_add_and_delete() {
        let state = local_state();
        let token = sign_in_token(&state).await;
        let app = admin_app!(state);

        let req = actix_test::TestRequest::post()
            .uri("/admin/timeline")
            .cookie(Cookie::new(SESSION_COOKIE, token.clone()))
            .set_form([
                ("type", "organization"),
                ("role", "Member"),
                ("company", "Club"),
                ("location", ""),
                ("start_date", "2021-05"),
                ("end_date", ""),
            ])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(location(&resp), ADMIN_TIMELINE);

        let rows: Vec<TimelineItem> = state.db.from("timeline").select().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].end_date, None);

        let req = actix_test::TestRequest::post()
            .uri("/admin/timeline")
            .cookie(Cookie::new(SESSION_COOKIE, token.clone()))
            .set_form([("type", "experience"), ("role", ""), ("company", "Acme"), ("start_date", "2020")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(resp).await.contains("Role is required."));

        let req = actix_test::TestRequest::post()
            .uri(&format!("/admin/timeline/{}/delete", rows[0].id))
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(location(&resp), ADMIN_TIMELINE);
        let rows: Vec<TimelineItem> = state.db.from("timeline").select().await.unwrap();
        assert!(rows.is_empty());
    }

    #[actix_web::test]
    async fn test_theme_toggle_sets_cookie() {
        let state = local_state();
        let token = sign_in_token(&state).await;
        let app = admin_app!(state);

        let req = actix_test::TestRequest::post()
            .uri("/admin/ui/theme")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .set_form([("back", "/admin/about")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(location(&resp), "/admin/about");
        assert!(resp
            .response()
            .cookies()
            .any(|c| c.name() == THEME_COOKIE && c.value() == "dark"));
    }
}
