use axum::http::StatusCode;
use thiserror::Error as ThisError;

use super::IsRetryable;

/// Failures talking to the chat-completion provider.
#[derive(Debug, ThisError)]
pub enum CompletionError {
    #[error("Groq API key is not configured")]
    MissingApiKey,

    /// Transport-level failure (DNS, connect, timeouts, etc).
    #[error("Groq request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status. `message` is the upstream error message when
    /// the body parsed, otherwise a bounded preview of the raw body.
    #[error("Groq returned {status}: {message}")]
    UpstreamStatus { status: StatusCode, message: String },

    #[error("Failed to decode Groq response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl IsRetryable for CompletionError {
    fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Reqwest(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            CompletionError::UpstreamStatus { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            CompletionError::MissingApiKey | CompletionError::Decode(_) => false,
        }
    }
}
