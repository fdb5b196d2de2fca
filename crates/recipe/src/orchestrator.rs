use chefkos_common::{AppConfig, ChefError, FailureMode, Result};
use chefkos_llm::ProviderSequencer;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::fallback::FallbackSynthesizer;
use crate::validate::IngredientList;

/// Where recipe text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeSource {
    Provider,
    Fallback,
}

impl fmt::Display for RecipeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider => write!(f, "provider"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Outcome of one recipe request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeResult {
    /// Markdown recipe text
    pub text: String,

    /// Provider or fallback
    pub source: RecipeSource,

    /// Model that produced the text (provider results only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl RecipeResult {
    fn fallback(text: String) -> Self {
        Self {
            text,
            source: RecipeSource::Fallback,
            model: None,
        }
    }
}

/// Turns an ingredient list into recipe text.
///
/// Providers are attempted first; on total failure the templated fallback
/// is rendered, unless the orchestrator runs fail-closed.
pub struct RecipeOrchestrator {
    sequencer: ProviderSequencer,
    fallback: FallbackSynthesizer,
    failure_mode: FailureMode,
    providers_enabled: bool,
}

impl RecipeOrchestrator {
    /// Create new orchestrator
    pub fn new(
        sequencer: ProviderSequencer,
        fallback: FallbackSynthesizer,
        failure_mode: FailureMode,
    ) -> Self {
        Self {
            sequencer,
            fallback,
            failure_mode,
            providers_enabled: true,
        }
    }

    /// Build provider clients and the template table from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let sequencer = ProviderSequencer::from_config(config)?;
        let orchestrator = Self::new(sequencer, FallbackSynthesizer::default(), config.failure_mode)
            .with_providers_enabled(config.providers_enabled);
        Ok(orchestrator)
    }

    /// Skip providers entirely when disabled
    pub fn with_providers_enabled(mut self, enabled: bool) -> Self {
        self.providers_enabled = enabled;
        self
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// Number of provider candidates that will be attempted
    pub fn active_providers(&self) -> usize {
        if self.providers_enabled {
            self.sequencer.len()
        } else {
            0
        }
    }

    /// Produce a recipe.
    ///
    /// In template mode this never fails. In closed mode total provider
    /// failure is returned as `AllProvidersFailed`.
    pub async fn generate(&self, ingredients: &IngredientList) -> Result<RecipeResult> {
        if ingredients.is_empty() {
            info!("Empty ingredient list, using fallback recipe");
            return Ok(RecipeResult::fallback(self.fallback.synthesize(ingredients)));
        }

        if !self.providers_enabled {
            info!("Providers disabled, using fallback recipe");
            return Ok(RecipeResult::fallback(self.fallback.synthesize(ingredients)));
        }

        info!("Requesting recipe for: {}", ingredients.joined());

        match self.sequencer.generate(ingredients.as_slice()).await {
            Ok(generation) => Ok(RecipeResult {
                text: generation.text,
                source: RecipeSource::Provider,
                model: Some(generation.model),
            }),
            Err(err @ ChefError::AllProvidersFailed { .. }) => match self.failure_mode {
                FailureMode::Template => {
                    warn!("{}; using fallback recipe", err);
                    Ok(RecipeResult::fallback(self.fallback.synthesize(ingredients)))
                }
                FailureMode::Closed => {
                    warn!("{}; failing closed", err);
                    Err(err)
                }
            },
            Err(err) => Err(err),
        }
    }
}
