use super::extract::{ActionPreprocess, decode};
use crate::error::RestockError;
use crate::inventory::ops;
use crate::server::router::RestockState;
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use restock_schema::Action;
use tracing::debug;

pub(super) async fn action_handler(
    State(state): State<RestockState>,
    ActionPreprocess(action, payload): ActionPreprocess,
) -> Result<Response, RestockError> {
    debug!(action = %action, "Incoming action");

    let store = state.store.as_ref();

    let resp = match action {
        Action::Add => Json(ops::add(store, decode(payload)?).await?).into_response(),
        Action::GetMissing => Json(ops::get_missing(store).await?).into_response(),
        Action::MarkReceived => {
            Json(ops::mark_received(store, decode(payload)?).await?).into_response()
        }
        Action::Delete => Json(ops::delete(store, decode(payload)?).await?).into_response(),
        Action::GetHistory => Json(ops::get_history(store).await?).into_response(),
        Action::GetMetrics => Json(ops::get_metrics(store).await?).into_response(),
        Action::ChatWithGroq => Json(
            ops::chat_with_context(
                store,
                state.completion.as_ref(),
                state.chat_history_limit,
                decode(payload)?,
            )
            .await?,
        )
        .into_response(),
    };

    Ok(resp)
}
