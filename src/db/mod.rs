//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `store.rs`: the `RecordStore` trait handlers depend on
//! - `actor.rs`: the ractor-owned SQLite pool implementing it

pub mod actor;
pub mod models;
pub mod schema;
pub mod store;

pub use models::{DbHistoryEntry, DbMissingProduct, MissingProductCreate};
pub use schema::SQLITE_INIT;
pub use store::RecordStore;

pub use actor::{DbActorHandle, spawn};
