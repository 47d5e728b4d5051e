use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `error` field of a failure body: either a plain message or an arbitrary
/// JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Message(String),
    Structured(Value),
}

impl ErrorPayload {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Human-readable form: messages verbatim, structured values as compact JSON.
    pub fn describe(&self) -> String {
        match self {
            Self::Message(message) => message.clone(),
            Self::Structured(value) => value.to_string(),
        }
    }
}

impl Default for ErrorPayload {
    fn default() -> Self {
        Self::Structured(Value::Null)
    }
}
