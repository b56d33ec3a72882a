use axum::{Json, http::StatusCode, response::IntoResponse};
use restock_schema::ErrorBody;
use thiserror::Error as ThisError;

use super::completion::CompletionError;

/// Error type of every inventory action.
///
/// The `Display` text is what the client sees in `{ "error": ... }`; dependency failures pass
/// the underlying message through unchanged.
#[derive(Debug, ThisError)]
pub enum RestockError {
    /// Missing or malformed input. Nothing was sent to the store.
    #[error("{0}")]
    Validation(String),

    #[error("invalid action")]
    InvalidAction,

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("{0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl RestockError {
    pub fn status(&self) -> StatusCode {
        match self {
            RestockError::Validation(_) | RestockError::InvalidAction => StatusCode::BAD_REQUEST,
            RestockError::NotFound(_) => StatusCode::NOT_FOUND,
            RestockError::Completion(_)
            | RestockError::DatabaseError(_)
            | RestockError::RactorError(_)
            | RestockError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestockError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "Action failed");
        } else {
            tracing::warn!(status = %status, error = %message, "Action rejected");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
