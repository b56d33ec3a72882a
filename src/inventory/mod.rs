//! Business logic of the inventory actions, independent of HTTP.
//!
//! Every operation receives its collaborators (record store, completion service) explicitly;
//! nothing here holds state between calls.

pub mod chat;
pub mod metrics;
pub mod ops;
pub mod product;
pub mod timing;

pub use timing::response_time_days;
