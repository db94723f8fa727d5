//! Per-chat settings

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ChatId;

/// Preferences of a single chat, keyed by its chat id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatSettings {
    pub chat_id: ChatId,
    /// Run the moderation check on this chat's messages
    pub stupidity_check: bool,
    /// Chat receives the recurring joke
    pub joke_subscribed: bool,
    /// Topic hint for subscribed jokes, may be empty
    pub joke_topic: String,
}

impl ChatSettings {
    /// Record for a chat that has never been configured
    pub fn new(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            stupidity_check: false,
            joke_subscribed: false,
            joke_topic: String::new(),
        }
    }
}
