mod chat_completion;
mod error;

pub use chat_completion::{
    ChatChoice, ChatChoiceMessage, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    ChatRole,
};
pub use error::{GroqErrorBody, GroqErrorObject};
