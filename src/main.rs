mod auth;
mod config;
mod db;
mod error;
mod middleware;
mod models;
mod pages;
mod routes;
mod services;
mod store;
mod utils;

#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{
    http::header,
    middleware::{Compress, Logger, NormalizePath},
    web, App, HttpResponse, HttpServer,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::auth::{AuthFactory, AuthProvider};
use crate::config::Config;
use crate::db::Database;
use crate::middleware::{PathRewrite, SecurityHeaders};
use crate::pages::Views;
use crate::routes::create_routes;
use crate::store::StoreFactory;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
    pub auth: Arc<dyn AuthProvider>,
    // Shared outbound client (contributions API)
    pub http: reqwest::Client,
    pub views: Arc<Views>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // `--hash-password <password>` prints an ADMIN_PASSWORD_HASH value and exits
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("--hash-password") {
        let password = args
            .get(2)
            .ok_or_else(|| anyhow::anyhow!("usage: portfolio-backend --hash-password <password>"))?;
        println!("{}", utils::password::hash_password(password)?);
        return Ok(());
    }

    // Initialize logging
    dotenvy::dotenv().ok();

    // RUST_LOG takes full directives, e.g. "info,portfolio_backend=debug"
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting portfolio backend");

    // Load configuration from environment
    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    info!("Configuration loaded from environment");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let store = StoreFactory::create(&config, http.clone())?;
    let db = Database::new(store);
    info!("Content store ready: {}", db.store_name());

    let auth = AuthFactory::create(&config, http.clone())?;
    info!("Auth provider ready: {}", auth.name());

    let views = Views::new()?;

    let state = web::Data::new(AppState {
        db,
        config: config.clone(),
        auth,
        http,
        views: Arc::new(views),
    });

    // Start server
    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    let cors_allow_origin = config.cors_allow_origin.clone();
    let security_headers = SecurityHeaders::from_config(&config);

    info!("Server running at http://{}", addr);

    HttpServer::new(move || {
        // Credentialed requests cannot use allow_any_origin(); "*" echoes the caller instead
        let cors = if cors_allow_origin == "*" {
            Cors::default()
                .allowed_origin_fn(|_origin, _req_head| true)
                .allow_any_method()
                .allow_any_header()
                .expose_headers(vec![header::SET_COOKIE])
                .supports_credentials()
                .max_age(3600)
        } else {
            let mut cors = Cors::default();
            for origin in cors_allow_origin.split(',').map(str::trim) {
                cors = cors.allowed_origin(origin);
            }
            cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::COOKIE,
                ])
                .expose_headers(vec![header::SET_COOKIE])
                .supports_credentials()
                .max_age(3600)
        };

        App::new()
            .app_data(state.clone())
            .wrap(PathRewrite)
            // Trailing slashes go before the rewrite table is consulted
            .wrap(NormalizePath::trim())
            .wrap(security_headers)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .wrap(cors)
            // Health checks
            .route("/health", web::get().to(health_check))
            .route("/health/store", web::get().to(health_check_store))
            // JSON API
            .service(web::scope("/api/v1").configure(create_routes))
            // HTML pages
            .configure(pages::public::create_routes)
            .configure(pages::login::create_routes)
            .configure(pages::admin::create_routes)
            .service(Files::new("/static", "./static"))
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": true }))
}

async fn health_check_store(state: web::Data<AppState>) -> Result<HttpResponse, crate::error::AppError> {
    state.db.ping().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": true,
        "store": state.db.store_name(),
    })))
}
