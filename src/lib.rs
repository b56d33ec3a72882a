pub mod config;
pub mod db;
pub mod error;
pub mod inventory;
pub mod providers;
pub mod server;

pub(crate) mod utils;

pub use error::{CompletionError, RestockError};
