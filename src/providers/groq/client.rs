use crate::config::GroqResolvedConfig;
use crate::error::{CompletionError, IsRetryable};
use crate::providers::CompletionService;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};
use restock_schema::{ChatCompletionRequest, ChatMessage};

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use super::GROQ_USER_AGENT;
use super::api::GroqApi;

/// Chat-completion client for the Groq OpenAI-compatible endpoint.
pub struct GroqClient {
    cfg: Arc<GroqResolvedConfig>,
    client: reqwest::Client,
    retry_policy: ExponentialBuilder,
}

impl GroqClient {
    pub fn new(cfg: Arc<GroqResolvedConfig>) -> Self {
        let client = build_client(GROQ_USER_AGENT, cfg.proxy.clone(), cfg.enable_multiplexing);
        Self::with_client(cfg, client)
    }

    pub fn with_client(cfg: Arc<GroqResolvedConfig>, client: reqwest::Client) -> Self {
        let retry_policy = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(300))
            .with_max_times(cfg.retry_max_times)
            .with_jitter();

        Self {
            cfg,
            client,
            retry_policy,
        }
    }

    fn request_body(&self, messages: &[ChatMessage]) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.cfg.model.clone(),
            messages: messages.to_vec(),
            temperature: Some(self.cfg.temperature),
            max_tokens: Some(self.cfg.max_tokens),
            stream: false,
        }
    }
}

#[async_trait]
impl CompletionService for GroqClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, CompletionError> {
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;
        let body = self.request_body(messages);

        let start = Instant::now();
        let resp = (|| GroqApi::post_chat_completion(&self.client, &self.cfg.api_url, api_key, &body))
            .retry(self.retry_policy)
            .when(|err: &CompletionError| err.is_retryable())
            .notify(|err, dur: Duration| {
                tracing::warn!("Groq retrying after error {} in {:?}", err, dur);
            })
            .await?;

        info!(
            channel = "groq",
            req.model = %self.cfg.model,
            req.messages = messages.len(),
            took_ms = start.elapsed().as_millis() as u64,
            choices = resp.choices.len(),
            "[Groq] Chat completion finished"
        );

        Ok(resp.first_content().map(str::to_string))
    }
}

fn build_client(
    user_agent: &str,
    proxy: Option<url::Url>,
    enable_multiplexing: bool,
) -> reqwest::Client {
    let mut headers = HeaderMap::new();

    let mut builder = reqwest::Client::builder()
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(60));

    if let Some(proxy_url) = proxy {
        let proxy = reqwest::Proxy::all(proxy_url.as_str())
            .expect("invalid proxy url for reqwest client");
        builder = builder.proxy(proxy);
    }

    if !enable_multiplexing {
        headers.insert(CONNECTION, HeaderValue::from_static("close"));

        builder = builder
            .http1_only()
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Duration::from_secs(0));
    } else {
        builder = builder.http2_adaptive_window(true);
    }

    builder
        .default_headers(headers)
        .build()
        .expect("failed to build reqwest client")
}
