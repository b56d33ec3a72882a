use crate::error::RestockError;
use crate::utils::logging::with_pretty_json_debug;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use restock_schema::Action;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

/// Resolved action name plus its (still untyped) JSON body.
pub(crate) struct ActionPreprocess(pub(crate) Action, pub(crate) Value);

impl<S> FromRequest<S> for ActionPreprocess
where
    S: Send + Sync,
{
    type Rejection = RestockError;

    /// Resolve `?action=` and read the body.
    ///
    /// - The action is matched exactly; a missing or unknown name is `InvalidAction`, checked
    ///   before the body is read.
    /// - An empty body or a literal `null` is treated as `{}`: the browser client sends
    ///   `JSON.stringify(null)` for actions without arguments.
    /// - Any other non-object body, or malformed JSON, is a validation error.
    /// - `Content-Type` is not inspected.
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let action = action_from_query(req.uri().query())?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RestockError::Validation(format!("failed to read request body: {e}")))?;
        let payload = parse_payload(&bytes)?;

        with_pretty_json_debug(&payload, |pretty_body| {
            debug!(
                action = %action,
                body = %pretty_body,
                "Extracted action request body"
            );
        });

        Ok(Self(action, payload))
    }
}

fn action_from_query(query: Option<&str>) -> Result<Action, RestockError> {
    let name = query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(k, _)| k == "action")
            .map(|(_, v)| v.into_owned())
    });

    name.and_then(|name| name.parse::<Action>().ok())
        .ok_or(RestockError::InvalidAction)
}

fn parse_payload(bytes: &[u8]) -> Result<Value, RestockError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| RestockError::Validation(format!("invalid JSON body: {e}")))?;

    match value {
        Value::Null => Ok(Value::Object(Map::new())),
        Value::Object(_) => Ok(value),
        _ => Err(RestockError::Validation(
            "request body must be a JSON object".to_string(),
        )),
    }
}

/// Decode the body into the action's request type.
pub(crate) fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, RestockError> {
    serde_json::from_value(payload)
        .map_err(|e| RestockError::Validation(format!("invalid request body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_schema::ProductIdRequest;
    use serde_json::json;

    #[test]
    fn action_is_read_from_query_exactly() {
        assert_eq!(
            action_from_query(Some("action=getMissing")).unwrap(),
            Action::GetMissing
        );
        assert_eq!(
            action_from_query(Some("key=abc&action=markReceived")).unwrap(),
            Action::MarkReceived
        );
        assert!(matches!(
            action_from_query(Some("action=getmissing")),
            Err(RestockError::InvalidAction)
        ));
        assert!(matches!(
            action_from_query(None),
            Err(RestockError::InvalidAction)
        ));
    }

    #[test]
    fn empty_and_null_bodies_become_empty_objects() {
        assert_eq!(parse_payload(b"").unwrap(), json!({}));
        assert_eq!(parse_payload(b"  \n").unwrap(), json!({}));
        assert_eq!(parse_payload(b"null").unwrap(), json!({}));
        assert_eq!(parse_payload(br#"{"id":1}"#).unwrap(), json!({"id":1}));
    }

    #[test]
    fn malformed_or_non_object_bodies_are_rejected() {
        assert!(matches!(
            parse_payload(b"not-json"),
            Err(RestockError::Validation(_))
        ));
        assert!(matches!(
            parse_payload(b"[1,2]"),
            Err(RestockError::Validation(_))
        ));
    }

    #[test]
    fn decode_reports_type_errors_as_validation() {
        let err = decode::<ProductIdRequest>(json!({ "id": true })).unwrap_err();
        assert!(matches!(err, RestockError::Validation(ref m) if m.starts_with("invalid request body")));
    }
}
