//! Chef Kos HTTP Server
//!
//! Actix-web REST API for recipe generation

pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{web, App, HttpServer};
use chefkos_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use routes::configure;
pub use state::AppState;

/// Build state from config and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_address = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!(
        "Starting server on http://{} - Providers: {}, Failure mode: {}",
        bind_address,
        state.orchestrator.active_providers(),
        state.orchestrator.failure_mode()
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_header(header::CONTENT_TYPE)
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(Arc::clone(&state)))
            .wrap(cors)
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
