//! Chat Completions request/response schema (OpenAI-compatible, as served by Groq).
//!
//! Schema reference:
//! https://console.groq.com/docs/api-reference#chat-create

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One conversation turn. Also the shape of the `history` items the browser
/// client sends with `action=chatWithGroq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for `POST /openai/v1/chat/completions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,

    pub messages: Vec<ChatMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub choices: Vec<ChatChoice>,

    /// Usage and provider-specific fields (`usage`, `x_groq`, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: u32,

    #[serde(default)]
    pub message: Option<ChatChoiceMessage>,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub role: Option<ChatRole>,

    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the upstream produced any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
            .filter(|content| !content.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_roles_lowercase_and_skips_unset_sampling() {
        let req = ChatCompletionRequest {
            model: "llama-3.1-8b-instant".to_string(),
            messages: vec![ChatMessage::system("ctx"), ChatMessage::user("hola")],
            temperature: None,
            max_tokens: Some(64),
            stream: false,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "model": "llama-3.1-8b-instant",
                "messages": [
                    { "role": "system", "content": "ctx" },
                    { "role": "user", "content": "hola" }
                ],
                "max_tokens": 64,
                "stream": false
            })
        );
    }

    #[test]
    fn first_content_reads_first_choice() {
        let resp: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "Two items." }, "finish_reason": "stop" },
                { "index": 1, "message": { "role": "assistant", "content": "ignored" } }
            ],
            "usage": { "total_tokens": 10 }
        }))
        .unwrap();
        assert_eq!(resp.first_content(), Some("Two items."));
        assert!(resp.extra.contains_key("usage"));
    }

    #[test]
    fn first_content_is_none_without_text() {
        let resp: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert_eq!(resp.first_content(), None);

        let resp: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [ { "message": { "role": "assistant", "content": "" } } ]
        }))
        .unwrap();
        assert_eq!(resp.first_content(), None);
    }
}
