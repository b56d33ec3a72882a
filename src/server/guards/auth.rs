use crate::server::router::RestockState;
use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use restock_schema::ErrorBody;
use subtle::ConstantTimeEq;

fn extract_header_token(headers: &axum::http::HeaderMap) -> Option<String> {
    if let Some(k) = headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        return Some(k.to_string());
    }
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

fn extract_query_token(query: Option<&str>) -> Option<String> {
    query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(k, _)| k == "key")
            .map(|(_, v)| v.into_owned())
    })
}

/// Passes every request when no `basic.access_key` is configured.
#[derive(Debug, Clone, Copy)]
pub struct RequireKeyAuth;

impl FromRequestParts<RestockState> for RequireKeyAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &RestockState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.access_key.as_deref() else {
            return Ok(RequireKeyAuth);
        };

        let token =
            extract_header_token(&parts.headers).or_else(|| extract_query_token(parts.uri.query()));

        match token {
            Some(key) => {
                if key.as_bytes().ct_eq(expected.as_bytes()).into() {
                    Ok(RequireKeyAuth)
                } else {
                    Err(AuthError::InvalidKey)
                }
            }
            None => Err(AuthError::MissingKey),
        }
    }
}

pub enum AuthError {
    MissingKey,
    InvalidKey,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let reason = match self {
            AuthError::MissingKey => "missing access key",
            AuthError::InvalidKey => "invalid access key",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                error: reason.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};

    #[test]
    fn api_key_header_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-bearer"));
        assert_eq!(extract_header_token(&headers).as_deref(), Some("from-bearer"));

        headers.insert("x-api-key", HeaderValue::from_static("from-header"));
        assert_eq!(extract_header_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn query_key_is_url_decoded() {
        assert_eq!(
            extract_query_token(Some("action=add&key=a%2Bb")).as_deref(),
            Some("a+b")
        );
        assert!(extract_query_token(Some("action=add")).is_none());
        assert!(extract_query_token(None).is_none());
    }
}
