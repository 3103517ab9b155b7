use serde_json::Value;

use crate::InterpretError;

/// Turn the provider's message content into a JSON value.
///
/// The value is returned as-is; checking that it is a known command is the
/// caller's job.
pub fn parse_completion(content: Option<String>) -> Result<Value, InterpretError> {
    let content = match content {
        Some(text) if !text.is_empty() => text,
        _ => return Err(InterpretError::UpstreamEmpty),
    };

    serde_json::from_str(&content).map_err(InterpretError::UpstreamUnparseable)
}
