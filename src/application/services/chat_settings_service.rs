//! Chat Settings Service - Per-chat preferences
//!
//! Records are created implicitly: the first update for an unseen chat id
//! merges onto [`ChatSettings::new`] and stores the result.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::dto::ChatSettingsPatch;
use crate::application::ports::outbound::{ChatSettingsRepositoryPort, SettingsError};
use crate::application::validation::Validate;
use crate::domain::entities::ChatSettings;
use crate::domain::value_objects::{merge, ChatId};

pub struct ChatSettingsService {
    repository: Arc<dyn ChatSettingsRepositoryPort>,
}

impl ChatSettingsService {
    pub fn new(repository: Arc<dyn ChatSettingsRepositoryPort>) -> Self {
        Self { repository }
    }

    /// All configured chats, ordered by chat id
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ChatSettings>, SettingsError> {
        let chats = self.repository.list().await?;
        debug!(count = chats.len(), "Listed chat settings");
        Ok(chats)
    }

    /// Stored settings of `chat_id`, `None` if the chat was never configured
    #[instrument(skip(self))]
    pub async fn get(&self, chat_id: ChatId) -> Result<Option<ChatSettings>, SettingsError> {
        self.repository.get(chat_id).await
    }

    /// Stored settings of `chat_id`, or a fresh unsaved record
    #[instrument(skip(self))]
    pub async fn get_or_default(&self, chat_id: ChatId) -> Result<ChatSettings, SettingsError> {
        Ok(self
            .repository
            .get(chat_id)
            .await?
            .unwrap_or_else(|| ChatSettings::new(chat_id)))
    }

    /// Validate `patch`, merge it onto the chat's record (creating it when
    /// absent) and persist the result. Returns the merged record as written.
    #[instrument(skip(self, patch), fields(chat_id = %chat_id))]
    pub async fn update(
        &self,
        chat_id: ChatId,
        patch: ChatSettingsPatch,
    ) -> Result<ChatSettings, SettingsError> {
        patch.validate()?;

        let current = self.get_or_default(chat_id).await?;
        let merged = merge(&current, patch);
        self.repository.upsert(&merged).await?;

        info!(
            stupidity_check = merged.stupidity_check,
            joke_subscribed = merged.joke_subscribed,
            "Updated chat settings"
        );
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryChatSettingsRepository;

    fn service() -> ChatSettingsService {
        ChatSettingsService::new(Arc::new(InMemoryChatSettingsRepository::new()))
    }

    #[tokio::test]
    async fn test_get_unknown_chat_is_none() {
        let service = service();
        assert!(service.get(ChatId::new(123)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_or_default_does_not_persist() {
        let service = service();

        let settings = service.get_or_default(ChatId::new(5)).await.unwrap();

        assert_eq!(settings, ChatSettings::new(ChatId::new(5)));
        assert!(service.get(ChatId::new(5)).await.unwrap().is_none());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_first_update_creates_record() {
        let service = service();
        let patch = ChatSettingsPatch {
            stupidity_check: Some(true),
            ..Default::default()
        };

        let created = service.update(ChatId::new(123), patch).await.unwrap();

        assert_eq!(
            created,
            ChatSettings {
                chat_id: ChatId::new(123),
                stupidity_check: true,
                joke_subscribed: false,
                joke_topic: String::new(),
            }
        );
        assert_eq!(service.get(ChatId::new(123)).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_later_update_keeps_untouched_fields() {
        let service = service();
        let chat_id = ChatId::new(-100);
        service
            .update(
                chat_id,
                ChatSettingsPatch {
                    joke_subscribed: Some(true),
                    joke_topic: Some("cats".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = service
            .update(
                chat_id,
                ChatSettingsPatch {
                    stupidity_check: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.stupidity_check);
        assert!(updated.joke_subscribed);
        assert_eq!(updated.joke_topic, "cats");
    }

    #[tokio::test]
    async fn test_invalid_topic_does_not_create_record() {
        let service = service();
        let patch = ChatSettingsPatch {
            joke_topic: Some("x".repeat(513)),
            ..Default::default()
        };

        let err = service.update(ChatId::new(9), patch).await.unwrap_err();

        assert!(matches!(err, SettingsError::Validation(_)));
        assert!(service.get(ChatId::new(9)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_chat_id() {
        let service = service();
        for id in [30, -5, 10] {
            service
                .update(ChatId::new(id), ChatSettingsPatch::default())
                .await
                .unwrap();
        }

        let ids: Vec<i64> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.chat_id.as_i64())
            .collect();

        assert_eq!(ids, vec![-5, 10, 30]);
    }
}
