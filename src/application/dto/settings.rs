use serde::{Deserialize, Serialize};

use crate::domain::entities::{ChatSettings, GlobalSettings};
use crate::impl_patch;

/// Standard envelope for global settings responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Partial update of the global settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettingsPatch {
    pub llm_model: Option<String>,
    pub history_max_len: Option<i32>,
    pub stupid_check: Option<f64>,
    pub daily_jokes_time: Option<String>,
    pub ai_instructions: Option<String>,
    pub stupidity_instructions: Option<String>,
    pub joke_instructions: Option<String>,
}

impl_patch!(GlobalSettingsPatch => GlobalSettings {
    llm_model,
    history_max_len,
    stupid_check,
    daily_jokes_time,
    ai_instructions,
    stupidity_instructions,
    joke_instructions,
});

/// Partial update of one chat's settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSettingsPatch {
    pub stupidity_check: Option<bool>,
    pub joke_subscribed: Option<bool>,
    pub joke_topic: Option<String>,
}

impl_patch!(ChatSettingsPatch => ChatSettings {
    stupidity_check,
    joke_subscribed,
    joke_topic,
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{merge, ChatId};

    fn stored_global() -> GlobalSettings {
        GlobalSettings {
            llm_model: "gpt-5".to_string(),
            history_max_len: 40,
            stupid_check: 0.15,
            daily_jokes_time: "06:00".to_string(),
            ai_instructions: "ai".to_string(),
            stupidity_instructions: "stupid".to_string(),
            joke_instructions: "joke".to_string(),
        }
    }

    #[test]
    fn test_global_patch_changes_only_present_fields() {
        let patch: GlobalSettingsPatch =
            serde_json::from_str(r#"{"historyMaxLen": 50}"#).unwrap();

        let merged = merge(&stored_global(), patch);

        assert_eq!(
            merged,
            GlobalSettings {
                history_max_len: 50,
                ..stored_global()
            }
        );
    }

    #[test]
    fn test_global_patch_field_order_does_not_matter() {
        let a: GlobalSettingsPatch =
            serde_json::from_str(r#"{"llmModel": "m", "stupidCheck": 0.5}"#).unwrap();
        let b: GlobalSettingsPatch =
            serde_json::from_str(r#"{"stupidCheck": 0.5, "llmModel": "m"}"#).unwrap();

        assert_eq!(merge(&stored_global(), a), merge(&stored_global(), b));
    }

    #[test]
    fn test_null_fields_count_as_absent() {
        let patch: GlobalSettingsPatch =
            serde_json::from_str(r#"{"llmModel": null, "jokeInstructions": "new"}"#).unwrap();

        let merged = merge(&stored_global(), patch);

        assert_eq!(merged.llm_model, "gpt-5");
        assert_eq!(merged.joke_instructions, "new");
    }

    #[test]
    fn test_chat_patch_keeps_falsy_stored_values() {
        let stored = ChatSettings {
            chat_id: ChatId::new(1),
            stupidity_check: true,
            joke_subscribed: false,
            joke_topic: String::new(),
        };
        let patch: ChatSettingsPatch =
            serde_json::from_str(r#"{"stupidityCheck": false}"#).unwrap();

        let merged = merge(&stored, patch);

        assert!(!merged.stupidity_check);
        assert!(!merged.joke_subscribed);
        assert_eq!(merged.joke_topic, "");
        assert_eq!(merged.chat_id, ChatId::new(1));
    }

    #[test]
    fn test_api_response_envelope() {
        let value = serde_json::to_value(ApiResponse::ok(1)).unwrap();
        assert_eq!(value, serde_json::json!({"success": true, "data": 1}));
    }
}
