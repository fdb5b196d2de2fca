use async_trait::async_trait;
use chefkos_common::{ApiKey, CandidateSpec, GenerationParameters, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::ProviderError;
use crate::llm_trait::InferenceClient;
use crate::prompts::RecipePrompt;
use crate::shape::{error_message, extract_text};
use crate::types::TextGenerationRequest;

/// Longest slice of a raw error body kept in messages
const MAX_ERROR_BODY: usize = 200;

/// Create the HTTP client shared by one inference client
pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;
    Ok(client)
}

/// Check the status and parse the body as JSON
pub(crate) async fn read_json(response: reqwest::Response) -> std::result::Result<Value, ProviderError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| error_message(&value))
            .unwrap_or_else(|| truncate(&body));
        return Err(ProviderError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// Hugging Face text-generation inference client
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    base_url: String,
    model: String,
    api_key: Option<ApiKey>,
    parameters: GenerationParameters,
    client: Client,
}

impl HuggingFaceClient {
    /// Create new client for one candidate
    pub fn new(candidate: &CandidateSpec, api_key: Option<ApiKey>, timeout: Duration) -> Result<Self> {
        let base_url = candidate.base_url();
        let client = build_http_client(timeout)?;

        info!("Hugging Face client initialized: {} ({})", candidate.model, base_url);
        Ok(Self {
            base_url,
            model: candidate.model.clone(),
            api_key,
            parameters: candidate.parameters.clone(),
            client,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    async fn generate(&self, prompt: &RecipePrompt) -> std::result::Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::NotConfigured("missing inference API key".to_string()))?;

        let request = TextGenerationRequest::new(prompt.combined(), &self.parameters);

        debug!(
            "Sending text-generation request - Model: {}, Prompt length: {}",
            self.model,
            request.inputs.len()
        );

        let response = self
            .client
            .post(self.url())
            .bearer_auth(api_key.expose())
            .json(&request)
            .send()
            .await?;

        let body = read_json(response).await?;
        let text = extract_text(&body)?;

        debug!("Received generation - Model: {}, Length: {}", self.model, text.len());
        Ok(text)
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

    const MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

    fn client_for(server: &MockServer, key: Option<&str>) -> HuggingFaceClient {
        let candidate = CandidateSpec::new(ProviderKind::HuggingFace, MODEL).with_endpoint(server.uri());
        HuggingFaceClient::new(&candidate, key.map(ApiKey::new), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_sequence_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/models/{}", MODEL)))
            .and(header("authorization", "Bearer hf_test"))
            .and(body_partial_json(json!({
                "parameters": {"max_new_tokens": 1024, "return_full_text": false},
                "options": {"wait_for_model": true}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"generated_text": "# Potato Salad"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("hf_test"));
        let prompt = RecipePrompt::for_ingredients(&["potato"]);
        let text = client.generate(&prompt).await.unwrap();
        assert_eq!(text, "# Potato Salad");
    }

    #[tokio::test]
    async fn test_generate_sends_combined_prompt() {
        let server = MockServer::start().await;
        let prompt = RecipePrompt::for_ingredients(&["eggs", "milk"]);

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"inputs": prompt.combined()})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"generated_text": "Custard"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("hf_test"));
        assert_eq!(client.generate(&prompt).await.unwrap(), "Custard");
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": "Model is currently loading",
                "estimated_time": 20.0
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("hf_test"));
        let err = client
            .generate(&RecipePrompt::for_ingredients(&["rice"]))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("Model is currently loading"));
    }

    #[tokio::test]
    async fn test_unparseable_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("hf_test"));
        let err = client
            .generate(&RecipePrompt::for_ingredients(&["rice"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client
            .generate(&RecipePrompt::for_ingredients(&["rice"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn test_truncate() {
        let long = "x".repeat(500);
        let short = truncate(&long);
        assert_eq!(short.len(), MAX_ERROR_BODY + 3);
        assert_eq!(truncate("  oops "), "oops");
    }
}
