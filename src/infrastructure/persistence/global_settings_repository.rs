use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{GlobalSettingsRepositoryPort, SettingsError};
use crate::domain::entities::GlobalSettings;

#[derive(sqlx::FromRow)]
struct GlobalSettingsRow {
    llm_model: String,
    history_max_len: i32,
    stupid_check: f64,
    daily_jokes_time: String,
    ai_instructions: String,
    stupidity_instructions: String,
    joke_instructions: String,
}

impl From<GlobalSettingsRow> for GlobalSettings {
    fn from(row: GlobalSettingsRow) -> Self {
        Self {
            llm_model: row.llm_model,
            history_max_len: row.history_max_len,
            stupid_check: row.stupid_check,
            daily_jokes_time: row.daily_jokes_time,
            ai_instructions: row.ai_instructions,
            stupidity_instructions: row.stupidity_instructions,
            joke_instructions: row.joke_instructions,
        }
    }
}

/// The singleton row of `settings_global`, always at [`GlobalSettings::ID`]
pub struct SqliteGlobalSettingsRepository {
    pool: SqlitePool,
}

impl SqliteGlobalSettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the default record unless one already exists.
    /// Returns whether a record was written.
    pub async fn seed_defaults(&self) -> Result<bool, SettingsError> {
        let defaults = GlobalSettings::default();
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO settings_global
                (id, llm_model, history_max_len, stupid_check, daily_jokes_time,
                 ai_instructions, stupidity_instructions, joke_instructions, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(GlobalSettings::ID)
        .bind(&defaults.llm_model)
        .bind(defaults.history_max_len)
        .bind(defaults.stupid_check)
        .bind(&defaults.daily_jokes_time)
        .bind(&defaults.ai_instructions)
        .bind(&defaults.stupidity_instructions)
        .bind(&defaults.joke_instructions)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| SettingsError::Database(e.to_string()))?;

        let seeded = result.rows_affected() > 0;
        if seeded {
            tracing::info!("Seeded default global settings");
        }
        Ok(seeded)
    }
}

#[async_trait]
impl GlobalSettingsRepositoryPort for SqliteGlobalSettingsRepository {
    async fn get(&self) -> Result<Option<GlobalSettings>, SettingsError> {
        let row: Option<GlobalSettingsRow> = sqlx::query_as(
            r#"
            SELECT llm_model, history_max_len, stupid_check, daily_jokes_time,
                   ai_instructions, stupidity_instructions, joke_instructions
            FROM settings_global
            WHERE id = ?
            "#,
        )
        .bind(GlobalSettings::ID)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SettingsError::Database(e.to_string()))?;

        Ok(row.map(GlobalSettings::from))
    }

    async fn upsert(&self, settings: &GlobalSettings) -> Result<GlobalSettings, SettingsError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO settings_global
                (id, llm_model, history_max_len, stupid_check, daily_jokes_time,
                 ai_instructions, stupidity_instructions, joke_instructions, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(GlobalSettings::ID)
        .bind(&settings.llm_model)
        .bind(settings.history_max_len)
        .bind(settings.stupid_check)
        .bind(&settings.daily_jokes_time)
        .bind(&settings.ai_instructions)
        .bind(&settings.stupidity_instructions)
        .bind(&settings.joke_instructions)
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

    #[tokio::test]
    async fn test_seeded_record_holds_defaults() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let settings = repository.global_settings().get().await.unwrap();
        assert_eq!(settings, Some(GlobalSettings::default()));
    }

    #[tokio::test]
    async fn test_upsert_then_get_round_trips() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let global = repository.global_settings();

        let settings = GlobalSettings {
            llm_model: "qwen2.5:7b-instruct".to_string(),
            history_max_len: 12,
            stupid_check: 1.0,
            daily_jokes_time: "23:59".to_string(),
            ..GlobalSettings::default()
        };
        let written = global.upsert(&settings).await.unwrap();

        assert_eq!(written, settings);
        assert_eq!(global.get().await.unwrap(), Some(settings));
    }

    #[tokio::test]
    async fn test_seeding_never_overwrites() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let global = repository.global_settings();

        let custom = GlobalSettings {
            history_max_len: 99,
            ..GlobalSettings::default()
        };
        global.upsert(&custom).await.unwrap();

        assert!(!global.seed_defaults().await.unwrap());
        assert_eq!(global.get().await.unwrap().unwrap().history_max_len, 99);
    }

    #[tokio::test]
    async fn test_single_row_after_many_upserts() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let global = repository.global_settings();

        for len in 1..=3 {
            let settings = GlobalSettings {
                history_max_len: len,
                ..GlobalSettings::default()
            };
            global.upsert(&settings).await.unwrap();
        }

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM settings_global")
            .fetch_one(repository.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_get_missing_record_is_none() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        sqlx::query("DELETE FROM settings_global")
            .execute(repository.pool())
            .await
            .unwrap();

        assert_eq!(repository.global_settings().get().await.unwrap(), None);
    }
}
