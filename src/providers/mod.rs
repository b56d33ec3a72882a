pub mod groq;

mod policy;

pub use groq::GroqClient;
pub use policy::{UPSTREAM_BODY_PREVIEW_CHARS, upstream_error_message};

use crate::error::CompletionError;
use async_trait::async_trait;
use restock_schema::ChatMessage;

/// A chat-completion backend.
///
/// Handlers only see this trait so tests can answer without a network.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends the turns in order and returns the first completion's text, if any.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, CompletionError>;
}
