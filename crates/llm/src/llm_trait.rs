use crate::error::ProviderError;
use crate::prompts::RecipePrompt;
use async_trait::async_trait;
use std::fmt;

/// Common trait for inference clients
#[async_trait]
pub trait InferenceClient: Send + Sync + fmt::Debug {
    /// Generate recipe text from a prompt
    async fn generate(&self, prompt: &RecipePrompt) -> Result<String, ProviderError>;

    /// Candidate identifier used in logs and results
    fn label(&self) -> String;
}
