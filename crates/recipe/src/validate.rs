use chefkos_common::{ChefError, Result};
use serde_json::Value;

/// Ingredients as supplied by the caller.
///
/// Entries are kept verbatim: no trimming, no deduplication, input order
/// preserved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IngredientList(Vec<String>);

impl IngredientList {
    pub fn new(items: Vec<String>) -> Self {
        Self(items)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries joined with ", "
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }

    /// Lookup key: a sorted copy joined with ","; `self` keeps its order
    pub fn canonical_key(&self) -> String {
        let mut sorted = self.0.clone();
        sorted.sort();
        sorted.join(",")
    }
}

impl From<Vec<String>> for IngredientList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl<'a> From<&[&'a str]> for IngredientList {
    fn from(items: &[&'a str]) -> Self {
        Self(items.iter().map(|s| s.to_string()).collect())
    }
}

/// Parse a raw request body `{ "ingredients": [string, ...] }`
pub fn parse_ingredients(body: &[u8]) -> Result<IngredientList> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ChefError::invalid_request(format!("body is not valid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| ChefError::invalid_request("body must be a JSON object"))?;

    let items = match object.get("ingredients") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => {
            return Err(ChefError::invalid_request("missing ingredients array"));
        }
        Some(_) => return Err(ChefError::invalid_request("ingredients must be an array")),
    };

    Ok(IngredientList::new(items.iter().map(entry_text).collect()))
}

/// Text of one array entry; non-string scalars keep their JSON spelling
fn entry_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
