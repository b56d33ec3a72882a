//! Groq (OpenAI-compatible) error envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "error": { "message": "...", "type": "...", "code": "..." } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqErrorBody {
    #[serde(rename = "error")]
    pub inner: GroqErrorObject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqErrorObject {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub code: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rate_limit_error() {
        let raw = r#"{"error":{"message":"Rate limit reached for model","type":"tokens","code":"rate_limit_exceeded"}}"#;
        let body: GroqErrorBody = serde_json::from_str(raw).unwrap();
        assert_eq!(
            body.inner.message.as_deref(),
            Some("Rate limit reached for model")
        );
        assert_eq!(body.inner.r#type.as_deref(), Some("tokens"));
    }
}
