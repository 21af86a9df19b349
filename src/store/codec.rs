//! Transport encoding for definition lists
//!
//! The persisted form is standard, padded base64 of a JSON array of records:
//! `[{"x":64,"y":53,"term":"Button text"}]` becomes
//! `W3sieCI6NjQsInkiOjUzLCJ0ZXJtIjoiQnV0dG9uIHRleHQifV0=`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use crate::models::{DefinitionDraft, DefinitionList, DefinitionRecord};

/// Failures while decoding a transport string
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array, found {0}")]
    NotAnArray(&'static str),
}

/// Encode a list into its transport string
pub fn encode(list: &[DefinitionRecord]) -> Result<String, TransportError> {
    let json = serde_json::to_string(list)?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Decode a transport string
///
/// Elements that are not usable records (nulls, missing fields, empty terms)
/// are dropped; a payload that is not an array at all is an error.
pub fn decode(transport: &str) -> Result<DefinitionList, TransportError> {
    let bytes = STANDARD.decode(transport.trim())?;
    let json = String::from_utf8(bytes)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => return Err(TransportError::NotAnArray(kind_of(&other))),
    };

    let list = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<DefinitionDraft>(item).ok())
        .filter_map(DefinitionDraft::into_record)
        .collect();

    Ok(list)
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
