//! SQLite connection pool and schema bootstrap

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use super::{SqliteChatSettingsRepository, SqliteGlobalSettingsRepository};
use crate::application::ports::outbound::{SettingsError, StoreHealthPort};

/// Combined repository providing access to both settings tables
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connect to `url`, create missing tables and seed the global record.
    /// `timeout` bounds how long a request waits for a pooled connection.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid SQLite connection string: {}", url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(timeout)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite settings database")?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool and bootstrap it
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let repository = Self { pool };
        repository.initialize_schema().await?;
        repository
            .global_settings()
            .seed_defaults()
            .await
            .context("Failed to seed default global settings")?;
        Ok(repository)
    }

    async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings_global (
                id TEXT PRIMARY KEY,
                llm_model TEXT NOT NULL,
                history_max_len INTEGER NOT NULL,
                stupid_check REAL NOT NULL,
                daily_jokes_time TEXT NOT NULL,
                ai_instructions TEXT NOT NULL,
                stupidity_instructions TEXT NOT NULL,
                joke_instructions TEXT NOT NULL,
                updated_at TIMESTAMP NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create settings_global table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_settings (
                chat_id INTEGER PRIMARY KEY,
                stupidity_check BOOLEAN NOT NULL DEFAULT 0,
                joke_subscribed BOOLEAN NOT NULL DEFAULT 0,
                joke_topic TEXT NOT NULL DEFAULT '',
                updated_at TIMESTAMP NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create chat_settings table")?;

        Ok(())
    }

    pub fn global_settings(&self) -> SqliteGlobalSettingsRepository {
        SqliteGlobalSettingsRepository::new(self.pool.clone())
    }

    pub fn chat_settings(&self) -> SqliteChatSettingsRepository {
        SqliteChatSettingsRepository::new(self.pool.clone())
    }

    /// Single-connection in-memory database. Every pooled connection to
    /// `sqlite::memory:` is a separate database, hence the one connection.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StoreHealthPort for SqliteRepository {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn ping(&self) -> Result<(), SettingsError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| SettingsError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::GlobalSettings;

    #[tokio::test]
    async fn test_bootstrap_seeds_global_settings() {
        let repository = SqliteRepository::in_memory().await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM settings_global WHERE id = ?")
            .bind(GlobalSettings::ID)
            .fetch_one(repository.pool())
            .await
            .unwrap();

        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let again = SqliteRepository::from_pool(repository.pool().clone()).await;
        assert!(again.is_ok());
    }

    #[tokio::test]
    async fn test_ping() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        assert!(repository.ping().await.is_ok());

        repository.pool().close().await;
        assert!(repository.ping().await.is_err());
    }
}
