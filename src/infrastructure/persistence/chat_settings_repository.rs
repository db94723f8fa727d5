use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{ChatSettingsRepositoryPort, SettingsError};
use crate::domain::entities::ChatSettings;
use crate::domain::value_objects::ChatId;

#[derive(sqlx::FromRow)]
struct ChatSettingsRow {
    chat_id: i64,
    stupidity_check: bool,
    joke_subscribed: bool,
    joke_topic: String,
}

impl From<ChatSettingsRow> for ChatSettings {
    fn from(row: ChatSettingsRow) -> Self {
        Self {
            chat_id: ChatId::new(row.chat_id),
            stupidity_check: row.stupidity_check,
            joke_subscribed: row.joke_subscribed,
            joke_topic: row.joke_topic,
        }
    }
}

pub struct SqliteChatSettingsRepository {
    pool: SqlitePool,
}

impl SqliteChatSettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatSettingsRepositoryPort for SqliteChatSettingsRepository {
    async fn list(&self) -> Result<Vec<ChatSettings>, SettingsError> {
        let rows: Vec<ChatSettingsRow> = sqlx::query_as(
            r#"
            SELECT chat_id, stupidity_check, joke_subscribed, joke_topic
            FROM chat_settings
            ORDER BY chat_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SettingsError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(ChatSettings::from).collect())
    }

    async fn get(&self, chat_id: ChatId) -> Result<Option<ChatSettings>, SettingsError> {
        let row: Option<ChatSettingsRow> = sqlx::query_as(
            r#"
            SELECT chat_id, stupidity_check, joke_subscribed, joke_topic
            FROM chat_settings
            WHERE chat_id = ?
            "#,
        )
        .bind(chat_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SettingsError::Database(e.to_string()))?;

        Ok(row.map(ChatSettings::from))
    }

    async fn upsert(&self, settings: &ChatSettings) -> Result<ChatSettings, SettingsError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO chat_settings
                (chat_id, stupidity_check, joke_subscribed, joke_topic, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(settings.chat_id.as_i64())
        .bind(settings.stupidity_check)
        .bind(settings.joke_subscribed)
        .bind(&settings.joke_topic)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| SettingsError::Database(e.to_string()))?;

        Ok(settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::SqliteRepository;

    fn chat(id: i64, topic: &str) -> ChatSettings {
        ChatSettings {
            chat_id: ChatId::new(id),
            stupidity_check: true,
            joke_subscribed: !topic.is_empty(),
            joke_topic: topic.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_unknown_chat_is_none() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let chats = repository.chat_settings();
        assert_eq!(chats.get(ChatId::new(123)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_upsert_creates_then_replaces() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let chats = repository.chat_settings();

        chats.upsert(&chat(123, "cats")).await.unwrap();
        assert_eq!(
            chats.get(ChatId::new(123)).await.unwrap(),
            Some(chat(123, "cats"))
        );

        let replaced = ChatSettings::new(ChatId::new(123));
        chats.upsert(&replaced).await.unwrap();
        assert_eq!(chats.get(ChatId::new(123)).await.unwrap(), Some(replaced));
        assert_eq!(chats.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_orders_by_chat_id() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let chats = repository.chat_settings();

        for id in [42, -1002065680710, 7] {
            chats.upsert(&chat(id, "")).await.unwrap();
        }

        let ids: Vec<i64> = chats
            .list()
            .await
            .unwrap()
            .iter()
            .map(|c| c.chat_id.as_i64())
            .collect();
        assert_eq!(ids, vec![-1002065680710, 7, 42]);
    }

    #[tokio::test]
    async fn test_unicode_topic_round_trips() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let chats = repository.chat_settings();

        chats.upsert(&chat(1, "шутки про котов 🐈")).await.unwrap();

        let stored = chats.get(ChatId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.joke_topic, "шутки про котов 🐈");
    }
}
