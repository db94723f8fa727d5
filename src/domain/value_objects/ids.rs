//! Strongly-typed identifiers for settings records

use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Telegram chat identifier. Negative for groups and channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ChatId> for i64 {
    fn from(id: ChatId) -> i64 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_id() {
        assert_eq!("123".parse::<ChatId>().unwrap(), ChatId::new(123));
        assert_eq!("-1002065680710".parse::<ChatId>().unwrap().as_i64(), -1002065680710);
        assert!("abc".parse::<ChatId>().is_err());
        assert!("".parse::<ChatId>().is_err());
    }

    #[test]
    fn test_chat_id_serializes_as_number() {
        let json = serde_json::to_string(&ChatId::new(-42)).unwrap();
        assert_eq!(json, "-42");
    }
}
