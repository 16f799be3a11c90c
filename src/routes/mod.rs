pub mod auth;
pub mod content;
pub mod projects;
pub mod timeline;

use actix_web::web;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/auths").configure(auth::create_routes))
        .service(web::scope("/home").configure(content::create_home_routes))
        .service(web::scope("/about").configure(content::create_about_routes))
        .service(web::scope("/projects").configure(projects::create_routes))
        .service(web::scope("/timeline").configure(timeline::create_routes));
}
