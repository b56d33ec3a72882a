//! Request bodies and response payloads of the inventory actions.

mod priority;
mod requests;
mod responses;

pub use priority::{Priority, UnknownPriority};
pub use requests::{AddProductRequest, ChatRequest, ProductIdRequest};
pub use responses::{ChatReply, ErrorBody, MetricsResponse, SuccessResponse};
