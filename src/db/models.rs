use chrono::{DateTime, Utc};
use restock_schema::Priority;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of `missing_products`. Serialized as-is in `add` and `getMissing` responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbMissingProduct {
    pub id: i64,
    pub product_name: String,
    pub supplier_name: String,
    /// Canonical `low` / `medium` / `high`.
    pub priority: String,
    pub requested_at: DateTime<Utc>,
}

/// Row of `product_history`. Serialized as-is in `getHistory` responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbHistoryEntry {
    pub id: i64,
    pub product_name: String,
    pub supplier_name: String,
    pub requested_at: DateTime<Utc>,
    pub received_at: DateTime<Utc>,
    pub response_time_days: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissingProductCreate {
    pub product_name: String,
    pub supplier_name: String,
    pub priority: Priority,
    pub requested_at: DateTime<Utc>,
}
