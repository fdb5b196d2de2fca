//! Provider chain configuration types
//!
//! A provider chain is the ordered list of inference candidates tried for
//! every recipe request. It is static configuration loaded at startup.

use crate::error::ChefError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default Hugging Face inference endpoint
pub const HUGGING_FACE_ENDPOINT: &str = "https://api-inference.huggingface.co";

/// Default Anthropic API endpoint
pub const ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com";

/// Inference API flavour spoken by a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Hugging Face text-generation inference API
    HuggingFace,
    /// Anthropic messages API
    Anthropic,
}

impl ProviderKind {
    /// Base URL used when a candidate has no endpoint override
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::HuggingFace => HUGGING_FACE_ENDPOINT,
            Self::Anthropic => ANTHROPIC_ENDPOINT,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HuggingFace => write!(f, "hugging_face"),
            Self::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// Generation options sent with every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// Maximum tokens to generate
    pub max_new_tokens: u32,

    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,

    /// Block until a cold model is loaded
    pub wait_for_model: bool,

    /// Include the echoed prompt in the output
    pub return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: 1024,
            temperature: 0.7,
            wait_for_model: true,
            return_full_text: false,
        }
    }
}

impl GenerationParameters {
    /// Validate parameter ranges
    pub fn validate(&self) -> Result<(), ChefError> {
        if self.max_new_tokens == 0 {
            return Err(ChefError::config("max_new_tokens must be positive"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ChefError::config(format!(
                "temperature must be within [0, 2], got {}",
                self.temperature
            )));
        }

        Ok(())
    }
}

/// One entry of the provider chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSpec {
    /// API flavour
    pub kind: ProviderKind,

    /// Model identifier (e.g., "mistralai/Mixtral-8x7B-Instruct-v0.1")
    pub model: String,

    /// Base URL override
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Environment variable holding a candidate-specific credential
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Generation options
    #[serde(default)]
    pub parameters: GenerationParameters,
}

impl CandidateSpec {
    /// Create candidate with default parameters
    pub fn new(kind: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            kind,
            model: model.into(),
            endpoint: None,
            api_key_env: None,
            parameters: GenerationParameters::default(),
        }
    }

    /// Override the base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> String {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.kind.default_endpoint())
            .trim_end_matches('/')
            .to_string()
    }

    /// Identifier used in logs
    pub fn label(&self) -> String {
        format!("{}:{}", self.kind, self.model)
    }

    /// Validate candidate fields
    pub fn validate(&self) -> Result<(), ChefError> {
        if self.model.trim().is_empty() {
            return Err(ChefError::config("Provider model name cannot be empty"));
        }

        let base_url = self.base_url();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ChefError::config(format!(
                "Endpoint for {} must start with http:// or https://",
                self.label()
            )));
        }

        self.parameters.validate()
    }
}

/// Chain used when no providers file is present
pub fn default_provider_chain() -> Vec<CandidateSpec> {
    vec![
        CandidateSpec::new(ProviderKind::HuggingFace, "mistralai/Mixtral-8x7B-Instruct-v0.1"),
        CandidateSpec::new(ProviderKind::HuggingFace, "mistralai/Mistral-7B-Instruct-v0.2"),
        CandidateSpec::new(ProviderKind::HuggingFace, "HuggingFaceH4/zephyr-7b-beta"),
    ]
}

/// What happens when every candidate fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Answer with the templated fallback recipe
    Template,
    /// Surface the failure to the caller (HTTP 503)
    Closed,
}

impl FromStr for FailureMode {
    type Err = ChefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "template" | "fallback" => Ok(Self::Template),
            "closed" => Ok(Self::Closed),
            other => Err(ChefError::config(format!("Unknown failure mode: {}", other))),
        }
    }
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => write!(f, "template"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// How candidates are dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// One candidate at a time, in order
    Sequential,
    /// All candidates at once, earliest-listed success wins
    Concurrent,
}

impl FromStr for Dispatch {
    type Err = ChefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "concurrent" => Ok(Self::Concurrent),
            other => Err(ChefError::config(format!("Unknown dispatch mode: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(GenerationParameters::default().validate().is_ok());
    }

    #[test]
    fn test_parameter_ranges() {
        let mut params = GenerationParameters::default();
        params.max_new_tokens = 0;
        assert!(params.validate().is_err());

        let mut params = GenerationParameters::default();
        params.temperature = 2.5;
        assert!(params.validate().is_err());

        params.temperature = 2.0;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_base_url() {
        let candidate = CandidateSpec::new(ProviderKind::Anthropic, "claude-3-haiku-20240307");
        assert_eq!(candidate.base_url(), "https://api.anthropic.com");

        let candidate = candidate.with_endpoint("http://localhost:9000/");
        assert_eq!(candidate.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_candidate_validate() {
        let candidate = CandidateSpec::new(ProviderKind::HuggingFace, "");
        assert!(candidate.validate().is_err());

        let candidate = CandidateSpec::new(ProviderKind::HuggingFace, "gpt2").with_endpoint("ftp://x");
        assert!(candidate.validate().is_err());
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("closed".parse::<FailureMode>().unwrap(), FailureMode::Closed);
        assert_eq!("Template".parse::<FailureMode>().unwrap(), FailureMode::Template);
        assert!("maybe".parse::<FailureMode>().is_err());
        assert_eq!("concurrent".parse::<Dispatch>().unwrap(), Dispatch::Concurrent);
    }

    #[test]
    fn test_default_chain() {
        let chain = default_provider_chain();
        assert_eq!(chain.len(), 3);
        assert!(chain.iter().all(|c| c.validate().is_ok()));
    }
}
