//! Action names accepted on the `?action=` query parameter.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Add,
    GetMissing,
    MarkReceived,
    Delete,
    GetHistory,
    GetMetrics,
    ChatWithGroq,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Add,
        Action::GetMissing,
        Action::MarkReceived,
        Action::Delete,
        Action::GetHistory,
        Action::GetMetrics,
        Action::ChatWithGroq,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::GetMissing => "getMissing",
            Action::MarkReceived => "markReceived",
            Action::Delete => "delete",
            Action::GetHistory => "getHistory",
            Action::GetMetrics => "getMetrics",
            Action::ChatWithGroq => "chatWithGroq",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action: {:?}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for Action {
    type Err = UnknownAction;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_action_name() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!("getmissing".parse::<Action>().is_err());
        assert!("Add".parse::<Action>().is_err());
        assert!("".parse::<Action>().is_err());
    }
}
