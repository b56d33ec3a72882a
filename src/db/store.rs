use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::models::{DbHistoryEntry, DbMissingProduct, MissingProductCreate};
use crate::error::RestockError;

/// Persistence seam for the inventory actions.
///
/// `DbActorHandle` is the production implementation; tests may substitute their own.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one open request and return the stored row.
    async fn insert_missing(
        &self,
        create: MissingProductCreate,
    ) -> Result<DbMissingProduct, RestockError>;

    /// All open requests, `requested_at` descending.
    async fn list_missing(&self) -> Result<Vec<DbMissingProduct>, RestockError>;

    async fn count_missing(&self) -> Result<u64, RestockError>;

    /// Delete by id and return the number of rows removed (0 for an unknown id).
    async fn delete_missing(&self, id: i64) -> Result<u64, RestockError>;

    /// History rows, `received_at` descending, optionally capped to the newest `limit`.
    async fn list_history(&self, limit: Option<u32>) -> Result<Vec<DbHistoryEntry>, RestockError>;

    /// Atomically move an open request into history as received at `received_at`.
    ///
    /// Returns `None` (and changes nothing) when `id` does not exist.
    async fn receive_missing(
        &self,
        id: i64,
        received_at: DateTime<Utc>,
    ) -> Result<Option<DbHistoryEntry>, RestockError>;
}
