//! Normalization of heterogeneous provider response bodies
//!
//! Providers return generated text in different places:
//!
//! * text-generation inference: `[{"generated_text": "..."}]`
//! * some deployments: `{"generated_text": "..."}`
//! * Anthropic messages: `{"content": [{"type": "text", "text": "..."}]}`
//!
//! The closed set of shapes below keeps extraction total.

use serde_json::{Map, Value};

use crate::error::ProviderError;

/// Text returned when a usable body carries no text
pub const GENERATION_SENTINEL: &str = "Sorry, I could not generate a recipe.";

/// Field names checked for generated text, in order
const TEXT_FIELDS: [&str; 3] = ["generated_text", "text", "completion"];

/// Known response shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// Array whose first element holds the text
    Sequence(String),
    /// Bare object holding the text
    Object(String),
    /// Anything else
    Unknown,
}

impl ResponseShape {
    /// Classify a parsed body
    pub fn classify(body: &Value) -> Self {
        match body {
            Value::Array(items) => items
                .first()
                .and_then(Value::as_object)
                .and_then(text_of)
                .map(|text| Self::Sequence(text.to_string()))
                .unwrap_or(Self::Unknown),
            Value::Object(map) => text_of(map)
                .map(|text| Self::Object(text.to_string()))
                .unwrap_or(Self::Unknown),
            _ => Self::Unknown,
        }
    }

    /// Whether the body counts as a successful generation
    pub fn is_usable(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Generated text, or the sentinel for unknown shapes.
    ///
    /// [`extract_text`] reports unknown shapes as errors instead, so the
    /// sentinel only reaches callers that classify bodies themselves.
    pub fn into_text(self) -> String {
        match self {
            Self::Sequence(text) | Self::Object(text) => text,
            Self::Unknown => GENERATION_SENTINEL.to_string(),
        }
    }
}

/// Extract generated text from a successful response body
pub fn extract_text(body: &Value) -> Result<String, ProviderError> {
    let shape = ResponseShape::classify(body);
    if !shape.is_usable() {
        let detail = error_message(body).unwrap_or_else(|| describe(body));
        return Err(ProviderError::UnexpectedResponseShape(detail));
    }
    Ok(shape.into_text())
}

/// Provider error message carried in a body, e.g. `{"error": "Model is loading"}`
/// or `{"error": {"type": "...", "message": "..."}}`
pub fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Object(error) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn text_of(map: &Map<String, Value>) -> Option<&str> {
    TEXT_FIELDS
        .iter()
        .find_map(|field| non_blank(map.get(*field)))
        .or_else(|| content_block_text(map))
}

fn content_block_text(map: &Map<String, Value>) -> Option<&str> {
    map.get("content")?
        .as_array()?
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .find_map(|block| non_blank(block.get("text")))
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

fn describe(body: &Value) -> String {
    match body {
        Value::Array(items) if items.is_empty() => "empty array".to_string(),
        Value::Array(_) => "array without generated text".to_string(),
        Value::Object(_) => "object without generated text".to_string(),
        Value::Null => "null body".to_string(),
        other => format!("unsupported body: {}", other),
    }
}
