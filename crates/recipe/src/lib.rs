//! Chef Kos recipe pipeline
//!
//! Request validation, provider orchestration and the templated fallback

mod fallback;
mod orchestrator;
mod validate;

pub use fallback::{FallbackSynthesizer, RecipeTemplate, FALLBACK_NOTE, PANTRY_ITEMS};
pub use orchestrator::{RecipeOrchestrator, RecipeResult, RecipeSource};
pub use validate::{parse_ingredients, IngredientList};
