//! Context assembly for `chatWithGroq`: the model is told to answer from a snapshot of the
//! store embedded as JSON in the system turn.

use restock_schema::ChatMessage;
use serde::Serialize;

use crate::db::{DbHistoryEntry, DbMissingProduct};
use crate::error::RestockError;

/// Reply used when the completion came back without any text.
pub const FALLBACK_REPLY: &str = "could not process request";

#[derive(Serialize)]
struct MissingContextRow<'a> {
    product_name: &'a str,
    supplier_name: &'a str,
    priority: &'a str,
}

#[derive(Serialize)]
struct HistoryContextRow<'a> {
    product_name: &'a str,
    supplier_name: &'a str,
    response_time_days: i64,
}

pub fn system_instruction(
    missing: &[DbMissingProduct],
    recent_history: &[DbHistoryEntry],
) -> Result<String, RestockError> {
    let missing_rows: Vec<MissingContextRow<'_>> = missing
        .iter()
        .map(|p| MissingContextRow {
            product_name: &p.product_name,
            supplier_name: &p.supplier_name,
            priority: &p.priority,
        })
        .collect();
    let history_rows: Vec<HistoryContextRow<'_>> = recent_history
        .iter()
        .map(|h| HistoryContextRow {
            product_name: &h.product_name,
            supplier_name: &h.supplier_name,
            response_time_days: h.response_time_days,
        })
        .collect();

    let missing_json = serde_json::to_string(&missing_rows)
        .map_err(|e| RestockError::UnexpectedError(format!("serialize chat context: {e}")))?;
    let history_json = serde_json::to_string(&history_rows)
        .map_err(|e| RestockError::UnexpectedError(format!("serialize chat context: {e}")))?;

    Ok(format!(
        "You are the assistant of a shop's missing-products tracker. \
         Answer ONLY with information found in the data below; if the data does not \
         contain the answer, say so. Be brief and reply in the user's language.\n\n\
         Products currently missing (JSON): {missing_json}\n\n\
         Most recently received products, newest first (JSON): {history_json}"
    ))
}

/// `[system, ...prior turns, user message]`
pub fn conversation(
    system: String,
    prior_turns: Vec<ChatMessage>,
    message: String,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(prior_turns.len() + 2);
    messages.push(ChatMessage::system(system));
    messages.extend(prior_turns);
    messages.push(ChatMessage::user(message));
    messages
}
