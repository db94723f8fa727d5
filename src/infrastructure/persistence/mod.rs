//! Settings store adapters
//!
//! Two backends implement the repository ports:
//! - `sqlite`: persistent store, tables created and the global record seeded
//!   on startup
//! - `memory`: process-local maps, seeded the same way

mod chat_settings_repository;
mod connection;
mod global_settings_repository;
mod memory;

pub use chat_settings_repository::SqliteChatSettingsRepository;
pub use connection::SqliteRepository;
pub use global_settings_repository::SqliteGlobalSettingsRepository;
pub use memory::{InMemoryChatSettingsRepository, InMemoryGlobalSettingsRepository, InMemoryHealth};

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::outbound::{
    ChatSettingsRepositoryPort, GlobalSettingsRepositoryPort, StoreHealthPort,
};
use crate::infrastructure::config::{AppConfig, StoreBackend};

/// Repository handles for whichever backend is configured
#[derive(Clone)]
pub struct SettingsStore {
    pub global_settings: Arc<dyn GlobalSettingsRepositoryPort>,
    pub chat_settings: Arc<dyn ChatSettingsRepositoryPort>,
    pub health: Arc<dyn StoreHealthPort>,
}

impl SettingsStore {
    /// Open the configured backend, creating the schema and seeding defaults
    pub async fn open(config: &AppConfig) -> Result<Self> {
        match config.store_backend {
            StoreBackend::Sqlite => {
                if config.database_url.is_none() {
                    tokio::fs::create_dir_all(&config.data_dir)
                        .await
                        .context("Failed to create settings database directory")?;
                }
                let url = config.database_url();
                let repository = SqliteRepository::connect(&url, config.store_timeout()).await?;
                tracing::info!("Connected to SQLite settings database: {}", url);
                Ok(Self::from_sqlite(repository))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory settings store, changes are lost on restart");
                Ok(Self::in_memory())
            }
        }
    }

    pub fn from_sqlite(repository: SqliteRepository) -> Self {
        Self {
            global_settings: Arc::new(repository.global_settings()),
            chat_settings: Arc::new(repository.chat_settings()),
            health: Arc::new(repository),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            global_settings: Arc::new(InMemoryGlobalSettingsRepository::seeded()),
            chat_settings: Arc::new(InMemoryChatSettingsRepository::new()),
            health: Arc::new(InMemoryHealth),
        }
    }
}
