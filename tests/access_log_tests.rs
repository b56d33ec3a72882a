use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use restock::CompletionError;
use restock::providers::CompletionService;
use restock::server::router::{RestockState, restock_router};
use restock_schema::ChatMessage;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

/// In-memory sink for formatted tracing output.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct NoCompletion;

#[async_trait]
impl CompletionService for NoCompletion {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<Option<String>, CompletionError> {
        Ok(None)
    }
}

#[tokio::test]
async fn query_access_key_never_reaches_the_log() {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "restock-access-log-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    let store = restock::db::spawn(&format!("sqlite:{}", temp_path.display())).await;

    let state = RestockState::new(Arc::new(store), Arc::new(NoCompletion), 15)
        .with_access_key(Some(Arc::from("s3cret-key")));
    let app = restock_router(state);

    for uri in [
        "/api?action=getMissing&key=s3cret-key",
        "/api?key=s3cret-key&action=getMetrics",
        "/api?action=getMissing&key=wrong-s3cret",
    ] {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed");
        let expected = if uri.contains("wrong") {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::OK
        };
        assert_eq!(resp.status(), expected, "{uri}");
    }

    let output = logs.contents();
    assert!(output.contains("/api?action=getMissing"), "{output}");
    assert!(output.contains("/api?action=getMetrics"), "{output}");
    assert!(!output.contains("s3cret"), "access key leaked into log:\n{output}");
}
