use chrono::Utc;
use restock_schema::{
    AddProductRequest, ChatReply, ChatRequest, MetricsResponse, ProductIdRequest,
    SuccessResponse,
};
use tracing::{debug, info};

use super::{chat, metrics, product};
use crate::db::{DbHistoryEntry, DbMissingProduct, RecordStore};
use crate::error::RestockError;
use crate::providers::CompletionService;

pub(crate) const MISSING_ID_MESSAGE: &str = "id is required";
pub(crate) const EMPTY_MESSAGE_MESSAGE: &str = "message is required";
pub(crate) const PRODUCT_NOT_FOUND_MESSAGE: &str = "product not found";

/// SQLite rowids start at 1, so `0` and negatives count as absent.
fn require_id(body: ProductIdRequest) -> Result<i64, RestockError> {
    body.id
        .filter(|id| *id > 0)
        .ok_or_else(|| RestockError::Validation(MISSING_ID_MESSAGE.to_string()))
}

/// `add`: validates, stamps `requested_at = now` and inserts one row.
pub async fn add(
    store: &dyn RecordStore,
    body: AddProductRequest,
) -> Result<Vec<DbMissingProduct>, RestockError> {
    let create = product::new_missing_product(body, Utc::now())?;
    let row = store.insert_missing(create).await?;

    info!(
        id = row.id,
        product = %row.product_name,
        supplier = %row.supplier_name,
        priority = %row.priority,
        "Missing product added"
    );
    Ok(vec![row])
}

/// `getMissing`: newest request first.
pub async fn get_missing(store: &dyn RecordStore) -> Result<Vec<DbMissingProduct>, RestockError> {
    store.list_missing().await
}

/// `markReceived`: moves the product into history in a single store transaction.
pub async fn mark_received(
    store: &dyn RecordStore,
    body: ProductIdRequest,
) -> Result<SuccessResponse, RestockError> {
    let id = require_id(body)?;

    let entry = store
        .receive_missing(id, Utc::now())
        .await?
        .ok_or_else(|| RestockError::NotFound(PRODUCT_NOT_FOUND_MESSAGE.to_string()))?;

    info!(
        id,
        history_id = entry.id,
        product = %entry.product_name,
        supplier = %entry.supplier_name,
        response_time_days = entry.response_time_days,
        "Product received"
    );
    Ok(SuccessResponse::OK)
}

/// `delete`: unconditional; deleting an unknown id still succeeds.
pub async fn delete(
    store: &dyn RecordStore,
    body: ProductIdRequest,
) -> Result<SuccessResponse, RestockError> {
    let id = require_id(body)?;
    let affected = store.delete_missing(id).await?;

    info!(id, affected, "Missing product deleted");
    Ok(SuccessResponse::OK)
}

/// `getHistory`: most recently received first.
pub async fn get_history(store: &dyn RecordStore) -> Result<Vec<DbHistoryEntry>, RestockError> {
    store.list_history(None).await
}

/// `getMetrics`
pub async fn get_metrics(store: &dyn RecordStore) -> Result<MetricsResponse, RestockError> {
    let missing_count = store.count_missing().await?;
    let history = store.list_history(None).await?;
    Ok(metrics::summarize(missing_count, &history))
}

/// `chatWithGroq`: answers `message` from a snapshot of the missing list and the most recent
/// `history_limit` history rows.
pub async fn chat_with_context(
    store: &dyn RecordStore,
    completion: &dyn CompletionService,
    history_limit: u32,
    body: ChatRequest,
) -> Result<ChatReply, RestockError> {
    let message = body
        .message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| RestockError::Validation(EMPTY_MESSAGE_MESSAGE.to_string()))?;

    let missing = store.list_missing().await?;
    let recent = store.list_history(Some(history_limit)).await?;

    let system = chat::system_instruction(&missing, &recent)?;
    let prior_turns = body.history.unwrap_or_default();
    debug!(
        missing = missing.len(),
        history = recent.len(),
        prior_turns = prior_turns.len(),
        "Assembled chat context"
    );

    let messages = chat::conversation(system, prior_turns, message);
    let reply = completion
        .complete(&messages)
        .await?
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| chat::FALLBACK_REPLY.to_string());

    Ok(ChatReply { reply })
}
