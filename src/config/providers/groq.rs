use serde::{Deserialize, Serialize};
use url::Url;

use super::ProviderDefaults;

/// Groq provider configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroqConfig {
    /// Chat Completions endpoint.
    /// TOML: `providers.groq.api_url`. Default: `https://api.groq.com/openai/v1/chat/completions`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// Bearer key for the Groq API. Also read from `GROQ_API_KEY`.
    /// TOML: `providers.groq.api_key`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name sent with every completion request.
    /// TOML: `providers.groq.model`. Default: `llama-3.1-8b-instant`.
    #[serde(default = "default_model")]
    pub model: String,

    /// TOML: `providers.groq.temperature`. Default: `0.3`.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// TOML: `providers.groq.max_tokens`. Default: `512`.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// How many of the most recent history rows are embedded in the chat context.
    /// TOML: `providers.groq.history_context_limit`. Default: `15`.
    #[serde(default = "default_history_context_limit")]
    pub history_context_limit: u32,

    /// Optional upstream HTTP proxy.
    /// TOML: `providers.groq.proxy`.
    /// Falls back to `providers.defaults.proxy` when unset.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Allow HTTP/2 multiplexing for reqwest clients; disabled forces HTTP/1.
    /// TOML: `providers.groq.enable_multiplexing`.
    /// Falls back to `providers.defaults.enable_multiplexing`.
    #[serde(default)]
    pub enable_multiplexing: Option<bool>,

    /// Max retry attempts for Groq upstream calls.
    /// TOML: `providers.groq.retry_max_times`.
    /// Falls back to `providers.defaults.retry_max_times`.
    #[serde(default)]
    pub retry_max_times: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct GroqResolvedConfig {
    pub api_url: Url,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub history_context_limit: u32,
    pub proxy: Option<Url>,
    pub enable_multiplexing: bool,
    pub retry_max_times: usize,
}

impl GroqConfig {
    pub fn resolve(&self, defaults: &ProviderDefaults) -> GroqResolvedConfig {
        GroqResolvedConfig {
            api_url: self.api_url.clone(),
            api_key: self
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            history_context_limit: self.history_context_limit,
            proxy: self.proxy.clone().or_else(|| defaults.proxy.clone()),
            enable_multiplexing: self
                .enable_multiplexing
                .unwrap_or(defaults.enable_multiplexing),
            retry_max_times: self.retry_max_times.unwrap_or(defaults.retry_max_times),
        }
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            history_context_limit: default_history_context_limit(),
            proxy: None,
            enable_multiplexing: None,
            retry_max_times: None,
        }
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.groq.com/openai/v1/chat/completions")
        .expect("default Groq url is valid")
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    512
}

fn default_history_context_limit() -> u32 {
    15
}
