use crate::db::models::{DbHistoryEntry, DbMissingProduct, MissingProductCreate};
use crate::db::schema::SQLITE_INIT;
use crate::db::store::RecordStore;
use crate::error::RestockError;
use crate::inventory::response_time_days;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert an open request and return the stored row.
    InsertMissing(
        MissingProductCreate,
        RpcReplyPort<Result<DbMissingProduct, RestockError>>,
    ),

    /// List open requests, newest first.
    ListMissing(RpcReplyPort<Result<Vec<DbMissingProduct>, RestockError>>),

    /// Count open requests.
    CountMissing(RpcReplyPort<Result<u64, RestockError>>),

    /// Delete an open request by id; replies with rows affected.
    DeleteMissing(i64, RpcReplyPort<Result<u64, RestockError>>),

    /// List history rows, newest first, optionally limited.
    ListHistory(
        Option<u32>,
        RpcReplyPort<Result<Vec<DbHistoryEntry>, RestockError>>,
    ),

    /// Move an open request into history (single transaction).
    ReceiveMissing(
        i64,
        DateTime<Utc>,
        RpcReplyPort<Result<Option<DbHistoryEntry>, RestockError>>,
    ),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

#[async_trait]
impl RecordStore for DbActorHandle {
    async fn insert_missing(
        &self,
        create: MissingProductCreate,
    ) -> Result<DbMissingProduct, RestockError> {
        ractor::call!(self.actor, DbActorMessage::InsertMissing, create).map_err(|e| {
            RestockError::RactorError(format!("DbActor InsertMissing RPC failed: {e}"))
        })?
    }

    async fn list_missing(&self) -> Result<Vec<DbMissingProduct>, RestockError> {
        ractor::call!(self.actor, DbActorMessage::ListMissing).map_err(|e| {
            RestockError::RactorError(format!("DbActor ListMissing RPC failed: {e}"))
        })?
    }

    async fn count_missing(&self) -> Result<u64, RestockError> {
        ractor::call!(self.actor, DbActorMessage::CountMissing).map_err(|e| {
            RestockError::RactorError(format!("DbActor CountMissing RPC failed: {e}"))
        })?
    }

    async fn delete_missing(&self, id: i64) -> Result<u64, RestockError> {
        ractor::call!(self.actor, DbActorMessage::DeleteMissing, id).map_err(|e| {
            RestockError::RactorError(format!("DbActor DeleteMissing RPC failed: {e}"))
        })?
    }

    async fn list_history(&self, limit: Option<u32>) -> Result<Vec<DbHistoryEntry>, RestockError> {
        ractor::call!(self.actor, DbActorMessage::ListHistory, limit).map_err(|e| {
            RestockError::RactorError(format!("DbActor ListHistory RPC failed: {e}"))
        })?
    }

    async fn receive_missing(
        &self,
        id: i64,
        received_at: DateTime<Utc>,
    ) -> Result<Option<DbHistoryEntry>, RestockError> {
        ractor::call!(self.actor, DbActorMessage::ReceiveMissing, id, received_at).map_err(|e| {
            RestockError::RactorError(format!("DbActor ReceiveMissing RPC failed: {e}"))
        })?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::InsertMissing(create, reply) => {
                let res = self.insert_missing(&state.pool, create).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListMissing(reply) => {
                let res = self.list_missing(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::CountMissing(reply) => {
                let res = self.count_missing(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteMissing(id, reply) => {
                let res = self.delete_missing(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListHistory(limit, reply) => {
                let res = self.list_history(&state.pool, limit).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ReceiveMissing(id, received_at, reply) => {
                let res = self.receive_missing(&state.pool, id, received_at).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn insert_missing(
        &self,
        pool: &SqlitePool,
        create: MissingProductCreate,
    ) -> Result<DbMissingProduct, RestockError> {
        let row = sqlx::query_as::<_, DbMissingProduct>(
            r#"
        INSERT INTO missing_products (product_name, supplier_name, priority, requested_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, product_name, supplier_name, priority, requested_at
        "#,
        )
        .bind(create.product_name)
        .bind(create.supplier_name)
        .bind(create.priority.as_str())
        .bind(create.requested_at)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    async fn list_missing(&self, pool: &SqlitePool) -> Result<Vec<DbMissingProduct>, RestockError> {
        let rows = sqlx::query_as::<_, DbMissingProduct>(
            r#"
        SELECT id, product_name, supplier_name, priority, requested_at
        FROM missing_products
        ORDER BY requested_at DESC, id DESC
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn count_missing(&self, pool: &SqlitePool) -> Result<u64, RestockError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM missing_products")
            .fetch_one(pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn delete_missing(&self, pool: &SqlitePool, id: i64) -> Result<u64, RestockError> {
        let result = sqlx::query("DELETE FROM missing_products WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_history(
        &self,
        pool: &SqlitePool,
        limit: Option<u32>,
    ) -> Result<Vec<DbHistoryEntry>, RestockError> {
        // SQLite treats a negative LIMIT as "no limit".
        let limit = limit.map_or(-1, i64::from);

        let rows = sqlx::query_as::<_, DbHistoryEntry>(
            r#"
        SELECT id, product_name, supplier_name, requested_at, received_at, response_time_days
        FROM product_history
        ORDER BY received_at DESC, id DESC
        LIMIT ?
        "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn receive_missing(
        &self,
        pool: &SqlitePool,
        id: i64,
        received_at: DateTime<Utc>,
    ) -> Result<Option<DbHistoryEntry>, RestockError> {
        let mut tx = pool.begin().await?;

        let product = sqlx::query_as::<_, DbMissingProduct>(
            r#"
        SELECT id, product_name, supplier_name, priority, requested_at
        FROM missing_products
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(product) = product else {
            tx.rollback().await?;
            debug!(id, "ReceiveMissing: no such product");
            return Ok(None);
        };

        let days = response_time_days(product.requested_at, received_at);

        let entry = sqlx::query_as::<_, DbHistoryEntry>(
            r#"
        INSERT INTO product_history (
            product_name, supplier_name, requested_at, received_at, response_time_days
        )
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, product_name, supplier_name, requested_at, received_at, response_time_days
        "#,
        )
        .bind(&product.product_name)
        .bind(&product.supplier_name)
        .bind(product.requested_at)
        .bind(received_at)
        .bind(days)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM missing_products WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(entry))
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// The actor is unnamed so several stores (e.g. one per test) can live in one process.
pub async fn spawn(database_url: &str) -> DbActorHandle {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .expect("failed to spawn DbActor");

    DbActorHandle { actor }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), RestockError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
