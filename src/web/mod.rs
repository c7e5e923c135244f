mod handlers;
mod state;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::config::Config;
pub use state::AppState;

/// Register the API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(handlers::health))
        .route("/api/defaults", web::get().to(handlers::defaults))
        .route("/api/liming", web::post().to(handlers::liming))
        .route("/api/sprayer", web::post().to(handlers::sprayer))
        .route("/api/batch", web::post().to(handlers::batch));
}

pub async fn start_server(config: Config) -> std::io::Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let data = web::Data::new(AppState::new(config));

    tracing::info!("Starting agronomic calculator API on http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .app_data(web::JsonConfig::default().limit(1024 * 1024))
            .configure(configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
