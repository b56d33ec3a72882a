mod api;
mod client;

pub use api::GroqApi;
pub use client::GroqClient;

/// User-Agent sent to the Groq API.
pub(crate) const GROQ_USER_AGENT: &str = concat!("restock/", env!("CARGO_PKG_VERSION"));
