//! Anthropic messages API client.

use async_trait::async_trait;
use chefkos_common::{ApiKey, CandidateSpec, GenerationParameters, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::client::{build_http_client, read_json};
use crate::error::ProviderError;
use crate::llm_trait::InferenceClient;
use crate::prompts::RecipePrompt;
use crate::shape::extract_text;
use crate::types::MessagesRequest;

/// API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic messages client
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    base_url: String,
    model: String,
    api_key: Option<ApiKey>,
    parameters: GenerationParameters,
    client: Client,
}

impl AnthropicClient {
    /// Create new client for one candidate
    pub fn new(candidate: &CandidateSpec, api_key: Option<ApiKey>, timeout: Duration) -> Result<Self> {
        let base_url = candidate.base_url();
        let client = build_http_client(timeout)?;

        info!("Anthropic client initialized: {} ({})", candidate.model, base_url);
        Ok(Self {
            base_url,
            model: candidate.model.clone(),
            api_key,
            parameters: candidate.parameters.clone(),
            client,
        })
    }
}

#[async_trait]
impl InferenceClient for AnthropicClient {
    async fn generate(&self, prompt: &RecipePrompt) -> std::result::Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::NotConfigured("missing Anthropic API key".to_string()))?;

        let request = MessagesRequest::new(&self.model, &prompt.system, &prompt.user, &self.parameters);

        debug!("Sending messages request - Model: {}", self.model);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let body = read_json(response).await?;
        extract_text(&body)
    }

    fn label(&self) -> String {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chefkos_common::ProviderKind;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AnthropicClient {
        let candidate = CandidateSpec::new(ProviderKind::Anthropic, "claude-3-haiku-20240307")
            .with_endpoint(server.uri());
        AnthropicClient::new(&candidate, Some(ApiKey::new("sk-ant-test")), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_messages() {
        let server = MockServer::start().await;
        let prompt = RecipePrompt::for_ingredients(&["tomato", "basil"]);

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(json!({
                "model": "claude-3-haiku-20240307",
                "system": prompt.system,
                "messages": [{"role": "user", "content": prompt.user}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": "# Caprese"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.generate(&prompt).await.unwrap(), "# Caprese");
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .generate(&RecipePrompt::for_ingredients(&["tomato"]))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("invalid x-api-key"));
        assert!(!err.to_string().contains("sk-ant-test"));
    }
}
