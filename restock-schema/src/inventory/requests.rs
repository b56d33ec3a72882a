use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Priority;
use crate::groq::ChatMessage;

/// Body of `action=add`.
///
/// Required-ness of the names is checked by the handler, not by serde, so a
/// missing field yields a validation message instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    #[serde(default)]
    pub product_name: Option<String>,

    #[serde(default)]
    pub supplier_name: Option<String>,

    /// Absent, `null` and `""` all mean "use the default".
    #[serde(
        default,
        deserialize_with = "deserialize_priority_lax",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
}

/// Body of `action=markReceived` and `action=delete`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProductIdRequest {
    #[serde(default, deserialize_with = "deserialize_id_lax")]
    pub id: Option<i64>,
}

/// Body of `action=chatWithGroq`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,

    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Option<Vec<ChatMessage>>,
}

fn deserialize_priority_lax<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Priority>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Browser forms hand ids around as strings; accept both `7` and `"7"`.
fn deserialize_id_lax<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("id must be an integer")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom("id must be an integer")),
        _ => Err(serde::de::Error::custom(
            "expected a string or a number for id",
        )),
    }
}
