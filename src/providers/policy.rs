use crate::utils::logging::with_pretty_json_debug;
use restock_schema::GroqErrorBody;

pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

/// Human-readable message for a non-2xx upstream body.
///
/// Structured `{ "error": { "message": ... } }` bodies yield their message; anything else is
/// returned as a bounded preview of the raw body.
pub fn upstream_error_message(bytes: &[u8]) -> String {
    if let Ok(error) = serde_json::from_slice::<GroqErrorBody>(bytes) {
        with_pretty_json_debug(&error, |pretty_error| {
            tracing::debug!(body = %pretty_error, "Upstream structured error");
        });

        if let Some(message) = error.inner.message.filter(|m| !m.is_empty()) {
            return message;
        }
    }

    let raw_body = String::from_utf8_lossy(bytes);
    tracing::debug!(
        body = %format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS),
        "Upstream unstructured error"
    );
    format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_error_yields_its_message() {
        let raw = br#"{"error":{"message":"Invalid API Key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert_eq!(upstream_error_message(raw), "Invalid API Key");
    }

    #[test]
    fn unstructured_error_is_truncated() {
        let raw = "x".repeat(UPSTREAM_BODY_PREVIEW_CHARS * 2);
        let message = upstream_error_message(raw.as_bytes());
        assert_eq!(message.len(), UPSTREAM_BODY_PREVIEW_CHARS);
    }
}
