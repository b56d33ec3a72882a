pub mod action;
pub mod groq;
pub mod inventory;

pub use action::{Action, UnknownAction};
pub use groq::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole, GroqErrorBody,
};
pub use inventory::{
    AddProductRequest, ChatReply, ChatRequest, ErrorBody, MetricsResponse, Priority,
    ProductIdRequest, SuccessResponse,
};
