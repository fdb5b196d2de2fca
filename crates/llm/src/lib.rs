//! Chef Kos LLM Integration
//!
//! Inference API clients and the ordered provider fallback chain

mod anthropic;
mod client;
mod error;
mod fake;
mod llm_trait;
mod prompts;
mod sequencer;
mod shape;
mod types;

pub use anthropic::AnthropicClient;
pub use client::HuggingFaceClient;
pub use error::ProviderError;
pub use fake::FakeClient;
pub use llm_trait::InferenceClient;
pub use prompts::{user_prompt, RecipePrompt, SYSTEM_PROMPT};
pub use sequencer::{build_client, ProviderSequencer};
pub use shape::{extract_text, ResponseShape, GENERATION_SENTINEL};
pub use types::{Generation, MessagesRequest, TextGenerationRequest};
