use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::nav::public_menu;
use super::skills::{select_snippet, SNIPPETS, TECH_STACKS};
use crate::error::AppResult;
use crate::models::{AboutContent, HomeContent, LoadState, TimelineItem, TimelineKind};
use crate::services::{ContentService, GithubService, ProjectService, TimelineService};
use crate::AppState;

const GREETINGS: &[&str] = &["Hello G", "Hello There", "Welcome", "Hi Stranger", "Hola Dev"];
const GREETING_PERIOD_SECS: i64 = 3;

#[derive(Debug, Serialize)]
pub struct Footer {
    pub location: &'static str,
    pub owner: &'static str,
    pub version: &'static str,
}

pub const FOOTER: Footer = Footer {
    location: "Bekasi, Jawa Barat - Indonesia",
    owner: "Hyunnism",
    version: env!("CARGO_PKG_VERSION"),
};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/public")
            .route("/home", web::get().to(home_page))
            .route("/about", web::get().to(about_page))
            .route("/skills", web::get().to(skills_page))
            .route("/projects", web::get().to(projects_page))
            .route("/experiences", web::get().to(experiences_page)),
    );
}

/// Greeting shown on the home page; rotates with the clock.
pub fn greeting_at(timestamp: i64) -> &'static str {
    let slot = timestamp.div_euclid(GREETING_PERIOD_SECS) as usize;
    GREETINGS[slot % GREETINGS.len()]
}

/// Timeline row as the templates display it.
#[derive(Debug, Serialize)]
pub struct TimelineEntry {
    pub id: String,
    pub role: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_label: String,
}

impl From<&TimelineItem> for TimelineEntry {
    fn from(item: &TimelineItem) -> Self {
        TimelineEntry {
            id: item.id.clone(),
            role: item.role.clone(),
            company: item.company.clone(),
            location: item.location.clone(),
            start_date: item.start_date.clone(),
            end_label: item.end_label().to_string(),
        }
    }
}

pub fn timeline_entries(items: &[TimelineItem]) -> Vec<TimelineEntry> {
    items.iter().map(TimelineEntry::from).collect()
}

async fn home_page(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let home = ContentService::new(&state.db).load::<HomeContent>().await;
    let loading = home.is_loading();
    let home = home.unwrap_or_default();

    state.views.page(
        "public/home",
        &json!({
            "title": "Home",
            "public_nav": public_menu(req.path()),
            "footer": FOOTER,
            "greeting": greeting_at(Utc::now().timestamp()),
            "loading": loading,
            "intro_text": home.intro_text,
            "pages": home.pages,
        }),
    )
}

async fn about_page(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let about = match ContentService::new(&state.db).latest::<AboutContent>().await {
        Ok(about) => about,
        Err(e) => {
            warn!("Failed to load about content: {}", e);
            None
        }
    };

    let contributions = match (&about, state.config.github_username.as_deref()) {
        (Some(_), Some(username)) => {
            GithubService::new(&state.http, username)
                .try_total_contributions()
                .await
        }
        _ => None,
    };

    state.views.page(
        "public/about",
        &json!({
            "title": "About",
            "public_nav": public_menu(req.path()),
            "footer": FOOTER,
            "about": about,
            "github_username": state.config.github_username,
            "contributions": contributions,
        }),
    )
}

#[derive(Debug, Deserialize)]
pub struct SkillsQuery {
    pub tab: Option<String>,
}

async fn skills_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<SkillsQuery>,
) -> AppResult<HttpResponse> {
    let snippet = select_snippet(query.tab.as_deref());
    let tabs: Vec<_> = SNIPPETS
        .iter()
        .map(|s| json!({"name": s.name, "active": s.name == snippet.name}))
        .collect();

    state.views.page(
        "public/skills",
        &json!({
            "title": "Skills",
            "public_nav": public_menu(req.path()),
            "footer": FOOTER,
            "tabs": tabs,
            "snippet": snippet.code,
            "tech_stacks": TECH_STACKS,
        }),
    )
}

async fn projects_page(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let projects = match ProjectService::new(&state.db).list().await {
        Ok(projects) => LoadState::Loaded(projects),
        Err(e) => {
            warn!("Failed to load projects: {}", e);
            LoadState::Loading
        }
    };

    state.views.page(
        "public/projects",
        &json!({
            "title": "Projects",
            "public_nav": public_menu(req.path()),
            "footer": FOOTER,
            "loading": projects.is_loading(),
            "projects": projects.unwrap_or_default(),
        }),
    )
}

#[derive(Debug, Deserialize)]
pub struct ExperiencesQuery {
    pub show: Option<String>,
}

async fn experiences_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ExperiencesQuery>,
) -> AppResult<HttpResponse> {
    let service = TimelineService::new(&state.db);
    let mut groups = Vec::with_capacity(2);

    for kind in [TimelineKind::Experience, TimelineKind::Organization] {
        let items = match service.list_kind(kind).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to load {} timeline: {}", kind.as_str(), e);
                Vec::new()
            }
        };
        groups.push(timeline_entries(&items));
    }
    let organizations = groups.pop().unwrap_or_default();
    let experiences = groups.pop().unwrap_or_default();

    state.views.page(
        "public/experiences",
        &json!({
            "title": "Experiences",
            "public_nav": public_menu(req.path()),
            "footer": FOOTER,
            "experiences": experiences,
            "organizations": organizations,
            "show_organizations": query.show.as_deref() == Some("organizations"),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::local_state;
    use actix_web::{http::StatusCode, test as actix_test, App};

    async fn get_page(state: &web::Data<AppState>, uri: &str) -> String {
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(create_routes),
        )
        .await;
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        String::from_utf8(actix_test::read_body(resp).await.to_vec()).unwrap()
    }

    #[test]
    fn test_greeting_rotates() {
        assert_eq!(greeting_at(0), "Hello G");
        assert_eq!(greeting_at(3), "Hello There");
        assert_eq!(greeting_at(15), "Hello G");
    }

    #[actix_web::test]
    async fn test_home_without_content() {
        let state = local_state();
        let html = get_page(&state, "/public/home").await;
        assert!(html.contains("Welcome to my portfolio!"));
        assert!(html.contains("No pages defined yet."));
    }

    #[actix_web::test]
    async fn test_home_lists_pages() {
        let state = local_state();
        state
            .db
            .from("home_content")
            .insert(&[json!({
                "intro_text": "Hi",
                "pages": [{"label": "Blog", "slug": "/blog"}]
            })])
            .await
            .unwrap();

        let html = get_page(&state, "/public/home").await;
        assert!(html.contains("Hi"));
        assert!(html.contains("01. "));
        assert!(html.contains(r#"href="/blog""#));
    }

    #[actix_web::test]
    async fn test_about_without_row_keeps_loading() {
        let state = local_state();
        let html = get_page(&state, "/public/about").await;
        assert!(html.contains("Loading about content..."));
    }

    #[actix_web::test]
    async fn test_skills_tab_selection() {
        let state = local_state();
        let html = get_page(&state, "/public/skills?tab=Python").await;
        assert!(html.contains("# Python"));
        assert!(!html.contains("// Javascript"));
    }

    #[actix_web::test]
    async fn test_experiences_toggle_organizations() {
        let state = local_state();
        state
            .db
            .from("timeline")
            .insert(&[
                json!({"type": "experience", "role": "Engineer", "company": "Acme", "start_date": "2023-01"}),
                json!({"type": "organization", "role": "Member", "company": "Club", "start_date": "2021-05"}),
            ])
            .await
            .unwrap();

        let html = get_page(&state, "/public/experiences").await;
        assert!(html.contains("Acme"));
        assert!(html.contains("Present"));
        assert!(!html.contains("Club"));
        assert!(html.contains("See Organizations"));

        let html = get_page(&state, "/public/experiences?show=organizations").await;
        assert!(html.contains("Club"));
        assert!(html.contains("Show Less"));
    }
}
