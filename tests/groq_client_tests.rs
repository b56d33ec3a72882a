use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use restock::CompletionError;
use restock::config::Config;
use restock::providers::{CompletionService, GroqClient};
use restock_schema::ChatMessage;
use serde_json::{Value, json};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use tokio::net::TcpListener;
use url::Url;

#[derive(Clone)]
struct UpstreamState {
    hits: Arc<AtomicUsize>,
    captured: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
    /// Responses served in order; the last one repeats.
    script: Arc<Vec<(StatusCode, Value)>>,
}

impl UpstreamState {
    fn new(script: Vec<(StatusCode, Value)>) -> Self {
        Self {
            hits: Arc::new(AtomicUsize::new(0)),
            captured: Arc::new(Mutex::new(Vec::new())),
            script: Arc::new(script),
        }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn completions_handler(
    State(state): State<UpstreamState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let n = state.hits.fetch_add(1, Ordering::SeqCst);
    state.captured.lock().unwrap().push((headers, body));

    let idx = n.min(state.script.len() - 1);
    let (status, payload) = state.script[idx].clone();
    (status, Json(payload))
}

async fn spawn_upstream(state: UpstreamState) -> Url {
    let app = Router::new()
        .route("/openai/v1/chat/completions", post(completions_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    Url::parse(&format!("http://{addr}/openai/v1/chat/completions")).expect("valid url")
}

fn client_for(api_url: Url, retry_max_times: usize) -> GroqClient {
    let mut cfg = Config::default().groq();
    cfg.api_url = api_url;
    cfg.api_key = Some("gsk-test".to_string());
    cfg.retry_max_times = retry_max_times;
    GroqClient::new(Arc::new(cfg))
}

fn completion_with(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "llama-3.1-8b-instant",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12 }
    })
}

#[tokio::test]
async fn completion_sends_bearer_and_returns_first_choice() {
    let upstream = UpstreamState::new(vec![(StatusCode::OK, completion_with("ok"))]);
    let url = spawn_upstream(upstream.clone()).await;
    let client = client_for(url, 0);

    let reply = client
        .complete(&[ChatMessage::system("ctx"), ChatMessage::user("hi")])
        .await
        .expect("completion succeeds");
    assert_eq!(reply.as_deref(), Some("ok"));
    assert_eq!(upstream.hits(), 1);

    let captured = upstream.captured.lock().unwrap();
    let (headers, body) = &captured[0];
    assert_eq!(
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer gsk-test")
    );
    assert_eq!(body["model"], "llama-3.1-8b-instant");
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "hi");
}

#[tokio::test]
async fn empty_choice_content_is_none() {
    let upstream = UpstreamState::new(vec![(StatusCode::OK, completion_with(""))]);
    let url = spawn_upstream(upstream.clone()).await;

    let reply = client_for(url, 0)
        .complete(&[ChatMessage::user("hi")])
        .await
        .expect("completion succeeds");
    assert!(reply.is_none());
}

#[tokio::test]
async fn structured_upstream_error_is_surfaced_without_retry() {
    let upstream = UpstreamState::new(vec![(
        StatusCode::UNAUTHORIZED,
        json!({
            "error": {
                "message": "Invalid API Key",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        }),
    )]);
    let url = spawn_upstream(upstream.clone()).await;

    let err = client_for(url, 3)
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();

    match err {
        CompletionError::UpstreamStatus { status, message } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Invalid API Key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // 4xx other than 429 is not retried.
    assert_eq!(upstream.hits(), 1);
}

#[tokio::test]
async fn server_error_is_retried_when_configured() {
    let upstream = UpstreamState::new(vec![
        (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "error": { "message": "over capacity" } }),
        ),
        (StatusCode::OK, completion_with("second try")),
    ]);
    let url = spawn_upstream(upstream.clone()).await;

    let reply = client_for(url, 1)
        .complete(&[ChatMessage::user("hi")])
        .await
        .expect("retry succeeds");
    assert_eq!(reply.as_deref(), Some("second try"));
    assert_eq!(upstream.hits(), 2);

    let captured = upstream.captured.lock().unwrap();
    let roles: Vec<&str> = captured
        .iter()
        .map(|(_, body)| body["messages"][0]["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["user", "user"]);
}

#[tokio::test]
async fn server_error_without_retries_fails_once() {
    let upstream = UpstreamState::new(vec![(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "error": { "message": "over capacity" } }),
    )]);
    let url = spawn_upstream(upstream.clone()).await;

    let err = client_for(url, 0)
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Groq returned 503 Service Unavailable: over capacity"
    );
    assert_eq!(upstream.hits(), 1);
}
