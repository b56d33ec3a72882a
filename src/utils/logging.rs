use serde::Serialize;

/// Longest pretty-printed payload handed to a DEBUG event; chat histories can be large.
pub(crate) const DEBUG_JSON_MAX_CHARS: usize = 4096;

/// Runs `log_action` with `value` rendered as pretty JSON, only when DEBUG is enabled.
pub(crate) fn with_pretty_json_debug<T, F>(value: &T, log_action: F)
where
    T: Serialize,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let rendered = match serde_json::to_string_pretty(value) {
        Ok(json) => clip(json, DEBUG_JSON_MAX_CHARS),
        Err(error) => format!("<pretty serialize failed: {error}>"),
    };
    log_action(&rendered);
}

fn clip(mut text: String, max_chars: usize) -> String {
    if let Some((cut, _)) = text.char_indices().nth(max_chars) {
        let omitted = text[cut..].chars().count();
        text.truncate(cut);
        text.push_str(&format!("… <{omitted} more chars>"));
    }
    text
}
