use crate::db::RecordStore;
use crate::providers::CompletionService;
use crate::server::guards::auth::RequireKeyAuth;
use crate::server::routes::actions;

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, Method, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
};
use base64::Engine as _;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// Shared, cheaply cloneable handler state. All collaborators are injected.
#[derive(Clone)]
pub struct RestockState {
    pub store: Arc<dyn RecordStore>,
    pub completion: Arc<dyn CompletionService>,
    /// Newest history rows embedded in the chat context.
    pub chat_history_limit: u32,
    pub access_key: Option<Arc<str>>,
    pub cors_allow_any_origin: bool,
}

impl RestockState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        completion: Arc<dyn CompletionService>,
        chat_history_limit: u32,
    ) -> Self {
        Self {
            store,
            completion,
            chat_history_limit,
            access_key: None,
            cors_allow_any_origin: false,
        }
    }

    #[must_use]
    pub fn with_access_key(mut self, access_key: Option<Arc<str>>) -> Self {
        self.access_key = access_key;
        self
    }

    #[must_use]
    pub fn with_cors_allow_any_origin(mut self, allow: bool) -> Self {
        self.cors_allow_any_origin = allow;
        self
    }
}

fn action_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "action")
        .map(|(_, v)| v.into_owned())
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn access_log(req: Request, next: Next) -> Response {
    // Capture request metadata before moving `req` into the handler stack.
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    // Only `action` is taken from the query; it may also carry the access key.
    let target = match uri.query().and_then(action_param) {
        Some(action) => format!("{}?action={action}", uri.path()),
        None => uri.path().to_string(),
    };
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            target,
            latency_ms,
            user_agent
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            target,
            latency_ms,
            user_agent
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            target,
            latency_ms,
            user_agent
        );
    }

    resp
}

pub fn restock_router(state: RestockState) -> Router {
    let cors_allow_any_origin = state.cors_allow_any_origin;

    let actions = actions::router().layer(middleware::from_extractor_with_state::<
        RequireKeyAuth,
        _,
    >(state.clone()));

    let router = Router::new()
        .merge(actions)
        .fallback(not_found_handler)
        .with_state(state);

    let router = if cors_allow_any_origin {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.layer(middleware::from_fn(access_log))
}
