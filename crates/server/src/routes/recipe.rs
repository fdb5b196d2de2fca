use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse};
use chefkos_recipe::parse_ingredients;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::state::AppState;
use crate::types::{ErrorResponse, RecipeResponse};

/// Body of every 400 response
pub const INVALID_INGREDIENTS: &str = "Invalid ingredients array";

/// POST /api/recipe - Generate a recipe for `{ "ingredients": [...] }`
pub async fn create_recipe(
    body: web::Bytes,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let ingredients = match parse_ingredients(&body) {
        Ok(ingredients) => ingredients,
        Err(e) => {
            warn!("Rejected recipe request: {}", e);
            return Ok(HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body(INVALID_INGREDIENTS));
        }
    };

    match state.orchestrator.generate(&ingredients).await {
        Ok(result) => {
            info!(
                "Recipe generated - Source: {}, Length: {}",
                result.source,
                result.text.len()
            );
            Ok(HttpResponse::Ok().json(RecipeResponse {
                recipe: result.text,
                source: result.source,
            }))
        }
        Err(e) => {
            error!("Recipe generation failed: {}", e);
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Ok(HttpResponse::build(status).json(ErrorResponse {
                error: e.to_string(),
            }))
        }
    }
}

/// Any method other than POST on a recipe path
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .content_type("text/plain; charset=utf-8")
        .body("Method Not Allowed")
}
