pub mod admin;
pub mod login;
pub mod nav;
pub mod public;
pub mod skills;

use actix_web::{http::header::ContentType, http::StatusCode, HttpResponse};
use handlebars::{handlebars_helper, Handlebars, TemplateError};
use serde::Serialize;
use serde_json::Value;

use crate::error::AppResult;

const TEMPLATES: &[(&str, &str)] = &[
    ("login", include_str!("templates/login.hbs")),
    ("public/home", include_str!("templates/public/home.hbs")),
    ("public/about", include_str!("templates/public/about.hbs")),
    ("public/skills", include_str!("templates/public/skills.hbs")),
    ("public/projects", include_str!("templates/public/projects.hbs")),
    ("public/experiences", include_str!("templates/public/experiences.hbs")),
    ("admin/home", include_str!("templates/admin/home.hbs")),
    ("admin/about", include_str!("templates/admin/about.hbs")),
    ("admin/projects", include_str!("templates/admin/projects.hbs")),
    ("admin/project_form", include_str!("templates/admin/project_form.hbs")),
    ("admin/confirm_delete", include_str!("templates/admin/confirm_delete.hbs")),
    ("admin/timeline", include_str!("templates/admin/timeline.hbs")),
];

const PARTIALS: &[(&str, &str)] = &[
    ("layout_public", include_str!("templates/layout_public.hbs")),
    ("layout_admin", include_str!("templates/layout_admin.hbs")),
];

pub fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();

    handlebars_helper!(exists: |v: Value| !v.is_null());
    handlebars.register_helper("exists", Box::new(exists));

    // 1-based, zero padded list position
    handlebars_helper!(number: |i: u64| format!("{:02}", i + 1));
    handlebars.register_helper("number", Box::new(number));

    handlebars_helper!(join: |v: Value| v
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(", "))
        .unwrap_or_default());
    handlebars.register_helper("join", Box::new(join));

    handlebars
}

/// Compiled page templates.
pub struct Views {
    handlebars: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = get_handlebars();

        for (name, source) in PARTIALS {
            handlebars.register_partial(name, *source)?;
        }
        for (name, source) in TEMPLATES {
            handlebars.register_template_string(name, *source)?;
        }

        Ok(Views { handlebars })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> AppResult<String> {
        Ok(self.handlebars.render(name, data)?)
    }

    pub fn page<T: Serialize>(&self, name: &str, data: &T) -> AppResult<HttpResponse> {
        self.page_with_status(StatusCode::OK, name, data)
    }

    pub fn page_with_status<T: Serialize>(
        &self,
        status: StatusCode,
        name: &str,
        data: &T,
    ) -> AppResult<HttpResponse> {
        let body = self.render(name, data)?;
        Ok(HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(body))
    }
}

/// 303 to `location`, the post/redirect/get answer for form posts.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, location.to_string()))
        .finish()
}
