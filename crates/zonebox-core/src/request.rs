use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/interpret`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterpretRequest {
    pub text: String,
}

impl InterpretRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Extract the request from an already-parsed body. `None` unless `text`
    /// is a string with something other than whitespace in it.
    pub fn from_body(body: &Value) -> Option<Self> {
        let text = body.get("text")?.as_str()?;
        if text.trim().is_empty() {
            return None;
        }
        Some(Self::new(text))
    }
}
