//! The single action endpoint: `POST /api?action=<name>` (also served at `/api/index`).

use crate::server::router::RestockState;
use axum::{Router, routing::post};

pub mod extract;
pub mod handlers;

pub fn router() -> Router<RestockState> {
    Router::new()
        .route("/api", post(handlers::action_handler))
        .route("/api/index", post(handlers::action_handler))
}
