use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Urgency of a missing-product request.
///
/// Serialized as lowercase English. The Spanish names used by the original
/// browser client (`baja`, `media`, `alta`) are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[serde(alias = "baja")]
    Low,
    #[default]
    #[serde(alias = "media")]
    Medium,
    #[serde(alias = "alta")]
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPriority(pub String);

impl fmt::Display for UnknownPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown priority {:?} (expected low, medium or high)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPriority {}

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" | "baja" => Ok(Priority::Low),
            "medium" | "media" => Ok(Priority::Medium),
            "high" | "alta" => Ok(Priority::High),
            other => Err(UnknownPriority(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_aliases_map_to_canonical_levels() {
        let p: Priority = serde_json::from_str(r#""media""#).unwrap();
        assert_eq!(p, Priority::Medium);
        let p: Priority = serde_json::from_str(r#""alta""#).unwrap();
        assert_eq!(p, Priority::High);
        assert_eq!("baja".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), r#""high""#);
    }

    #[test]
    fn default_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
