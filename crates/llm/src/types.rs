use chefkos_common::GenerationParameters;
use serde::Serialize;

/// Hugging Face text-generation request
#[derive(Debug, Clone, Serialize)]
pub struct TextGenerationRequest {
    /// Prompt text
    pub inputs: String,

    /// Generation options
    pub parameters: TextGenerationParameters,

    /// Inference API options
    pub options: InferenceOptions,
}

/// Generation options for text-generation inference
#[derive(Debug, Clone, Serialize)]
pub struct TextGenerationParameters {
    /// Maximum tokens to generate
    pub max_new_tokens: u32,

    /// Temperature (0.0 - 2.0)
    pub temperature: f32,

    /// Echo the prompt in the output
    pub return_full_text: bool,
}

/// Inference API behaviour options
#[derive(Debug, Clone, Serialize)]
pub struct InferenceOptions {
    /// Wait for a cold model instead of returning 503
    pub wait_for_model: bool,
}

impl TextGenerationRequest {
    pub fn new(inputs: String, params: &GenerationParameters) -> Self {
        Self {
            inputs,
            parameters: TextGenerationParameters {
                max_new_tokens: params.max_new_tokens,
                temperature: params.temperature,
                return_full_text: params.return_full_text,
            },
            options: InferenceOptions {
                wait_for_model: params.wait_for_model,
            },
        }
    }
}

/// Anthropic messages request
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    /// Model name (e.g., "claude-3-haiku-20240307")
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Temperature (0.0 - 1.0 for this API; clamped)
    pub temperature: f32,

    /// System instruction
    pub system: String,

    /// Conversation turns
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl MessagesRequest {
    pub fn new(model: &str, system: &str, user: &str, params: &GenerationParameters) -> Self {
        Self {
            model: model.to_string(),
            max_tokens: params.max_new_tokens,
            temperature: params.temperature.min(1.0),
            system: system.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
        }
    }
}

/// Text produced by a successful candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Generated recipe text
    pub text: String,

    /// Candidate that produced it
    pub model: String,
}
