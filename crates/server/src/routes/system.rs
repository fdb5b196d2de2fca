use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

use crate::state::AppState;
use crate::types::HealthResponse;

/// Liveness and provider summary
#[get("/health")]
pub async fn health(state: web::Data<Arc<AppState>>) -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        providers: state.orchestrator.active_providers(),
        failure_mode: state.orchestrator.failure_mode(),
        dispatch: state.config.dispatch,
    }))
}
