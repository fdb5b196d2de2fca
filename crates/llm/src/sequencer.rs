use chefkos_common::{AppConfig, ApiKey, CandidateSpec, ChefError, Dispatch, ProviderKind, Result};
use futures::stream::{FuturesOrdered, StreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::anthropic::AnthropicClient;
use crate::client::HuggingFaceClient;
use crate::llm_trait::InferenceClient;
use crate::prompts::RecipePrompt;
use crate::types::Generation;

/// Build the inference client for one candidate
pub fn build_client(
    candidate: &CandidateSpec,
    api_key: Option<ApiKey>,
    timeout: Duration,
) -> Result<Box<dyn InferenceClient>> {
    let client: Box<dyn InferenceClient> = match candidate.kind {
        ProviderKind::HuggingFace => Box::new(HuggingFaceClient::new(candidate, api_key, timeout)?),
        ProviderKind::Anthropic => Box::new(AnthropicClient::new(candidate, api_key, timeout)?),
    };
    Ok(client)
}

/// Tries provider candidates in preference order until one produces text
pub struct ProviderSequencer {
    candidates: Vec<Box<dyn InferenceClient>>,
    dispatch: Dispatch,
}

impl ProviderSequencer {
    /// Create sequencer over prebuilt clients
    pub fn new(candidates: Vec<Box<dyn InferenceClient>>, dispatch: Dispatch) -> Self {
        Self { candidates, dispatch }
    }

    /// Build every candidate of the configured provider chain
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);

        let candidates = config
            .providers
            .iter()
            .map(|candidate| build_client(candidate, config.credential_for(candidate), timeout))
            .collect::<Result<Vec<_>>>()?;

        if config.api_key.is_none() {
            warn!("INFERENCE_API_KEY is not set; candidates without their own key will fail");
        }

        info!(
            "Provider sequencer ready - Candidates: {}, Dispatch: {:?}",
            candidates.len(),
            config.dispatch
        );

        Ok(Self::new(candidates, config.dispatch))
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Generate a recipe for the ingredients.
    ///
    /// Fails with `AllProvidersFailed` carrying the last candidate error
    /// when no candidate produced text.
    pub async fn generate(&self, ingredients: &[String]) -> Result<Generation> {
        if self.candidates.is_empty() {
            return Err(ChefError::all_providers_failed(0, "no provider candidates configured"));
        }

        let prompt = RecipePrompt::for_ingredients(ingredients);

        match self.dispatch {
            Dispatch::Sequential => self.run_sequential(&prompt).await,
            Dispatch::Concurrent => self.run_concurrent(&prompt).await,
        }
    }

    async fn run_sequential(&self, prompt: &RecipePrompt) -> Result<Generation> {
        let total = self.candidates.len();
        let mut last_error = String::new();

        for (i, client) in self.candidates.iter().enumerate() {
            let label = client.label();
            debug!("Trying provider candidate {}/{}: {}", i + 1, total, label);

            match client.generate(prompt).await {
                Ok(text) => {
                    info!("Provider candidate {} succeeded - Length: {}", label, text.len());
                    return Ok(Generation { text, model: label });
                }
                Err(e) => {
                    warn!("Provider candidate {} failed (attempt {}/{}): {}", label, i + 1, total, e);
                    last_error = format!("{}: {}", label, e);
                }
            }
        }

        Err(ChefError::all_providers_failed(total, last_error))
    }

    /// All candidates run at once; results are consumed in list order, so
    /// the earliest-listed success wins even if a later one finished first.
    async fn run_concurrent(&self, prompt: &RecipePrompt) -> Result<Generation> {
        let total = self.candidates.len();
        let mut last_error = String::new();

        let mut pending: FuturesOrdered<_> = self
            .candidates
            .iter()
            .map(|client| async move { (client.label(), client.generate(prompt).await) })
            .collect();

        while let Some((label, outcome)) = pending.next().await {
            match outcome {
                Ok(text) => {
                    info!("Provider candidate {} succeeded - Length: {}", label, text.len());
                    return Ok(Generation { text, model: label });
                }
                Err(e) => {
                    warn!("Provider candidate {} failed: {}", label, e);
                    last_error = format!("{}: {}", label, e);
                }
            }
        }

        Err(ChefError::all_providers_failed(total, last_error))
    }
}
