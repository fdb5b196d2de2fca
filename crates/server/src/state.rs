use chefkos_common::{AppConfig, Result};
use chefkos_recipe::RecipeOrchestrator;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Recipe pipeline, read-only at request time
    pub orchestrator: RecipeOrchestrator,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig) -> Result<Self> {
        let orchestrator = RecipeOrchestrator::from_config(&config)?;
        Ok(Self::with_orchestrator(config, orchestrator))
    }

    /// Create state around a prebuilt orchestrator
    pub fn with_orchestrator(config: AppConfig, orchestrator: RecipeOrchestrator) -> Self {
        Self { config, orchestrator }
    }
}
