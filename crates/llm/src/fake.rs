//! Fake inference client for testing.
//!
//! Returns a scripted outcome without network access and counts how often
//! it was called, so ordering and short-circuit behaviour can be asserted.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ProviderError;
use crate::llm_trait::InferenceClient;
use crate::prompts::RecipePrompt;

#[derive(Debug, Clone)]
enum FakeOutcome {
    Text(String),
    Status(u16, String),
}

/// A scripted inference client.
#[derive(Debug)]
pub struct FakeClient {
    label: String,
    outcome: FakeOutcome,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl FakeClient {
    /// Client that always returns `text`
    pub fn succeeding(label: &str, text: &str) -> Self {
        Self::with_outcome(label, FakeOutcome::Text(text.to_string()))
    }

    /// Client that always fails with an HTTP status
    pub fn failing(label: &str, status: u16, message: &str) -> Self {
        Self::with_outcome(label, FakeOutcome::Status(status, message.to_string()))
    }

    fn with_outcome(label: &str, outcome: FakeOutcome) -> Self {
        Self {
            label: label.to_string(),
            outcome,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared handle on the call counter
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl InferenceClient for FakeClient {
    async fn generate(&self, _prompt: &RecipePrompt) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            FakeOutcome::Text(text) => Ok(text.clone()),
            FakeOutcome::Status(status, message) => Err(ProviderError::Status {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}
