use chefkos_common::{Dispatch, FailureMode};
use chefkos_recipe::RecipeSource;
use serde::Serialize;

/// Recipe response
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    /// Markdown recipe text
    pub recipe: String,

    /// Provider or fallback
    pub source: RecipeSource,
}

/// Error response (fail-closed mode)
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,

    /// Provider candidates attempted per request
    pub providers: usize,

    pub failure_mode: FailureMode,

    pub dispatch: Dispatch,
}
