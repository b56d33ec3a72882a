use crate::error::CompletionError;
use crate::providers::upstream_error_message;
use restock_schema::{ChatCompletionRequest, ChatCompletionResponse};

pub struct GroqApi;

impl GroqApi {
    pub fn build_chat_request(
        client: &reqwest::Client,
        api_url: &url::Url,
        api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<reqwest::Request, reqwest::Error> {
        client
            .post(api_url.clone())
            .bearer_auth(api_key)
            .json(body)
            .build()
    }

    /// Single attempt; retries are the caller's concern.
    pub async fn post_chat_completion(
        client: &reqwest::Client,
        api_url: &url::Url,
        api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        let req = Self::build_chat_request(client, api_url, api_key, body)?;
        let resp = client.execute(req).await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            return Err(CompletionError::UpstreamStatus {
                status,
                message: upstream_error_message(&bytes),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}
