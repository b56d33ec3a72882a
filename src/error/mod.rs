mod completion;
mod restock;

pub use completion::CompletionError;
pub use restock::RestockError;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
