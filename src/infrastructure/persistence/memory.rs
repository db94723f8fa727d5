//! Process-local settings store

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{
    ChatSettingsRepositoryPort, GlobalSettingsRepositoryPort, SettingsError, StoreHealthPort,
};
use crate::domain::entities::{ChatSettings, GlobalSettings};
use crate::domain::value_objects::ChatId;

#[derive(Default)]
pub struct InMemoryGlobalSettingsRepository {
    settings: RwLock<Option<GlobalSettings>>,
}

impl InMemoryGlobalSettingsRepository {
    /// Empty store, as before first boot
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the default record
    pub fn seeded() -> Self {
        Self {
            settings: RwLock::new(Some(GlobalSettings::default())),
        }
    }
}

#[async_trait]
impl GlobalSettingsRepositoryPort for InMemoryGlobalSettingsRepository {
    async fn get(&self) -> Result<Option<GlobalSettings>, SettingsError> {
        Ok(self.settings.read().await.clone())
    }

    async fn upsert(&self, settings: &GlobalSettings) -> Result<GlobalSettings, SettingsError> {
        *self.settings.write().await = Some(settings.clone());
        Ok(settings.clone())
    }
}

/// Chat records kept ordered by chat id
#[derive(Default)]
pub struct InMemoryChatSettingsRepository {
    chats: RwLock<BTreeMap<ChatId, ChatSettings>>,
}

impl InMemoryChatSettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatSettingsRepositoryPort for InMemoryChatSettingsRepository {
    async fn list(&self) -> Result<Vec<ChatSettings>, SettingsError> {
        Ok(self.chats.read().await.values().cloned().collect())
    }

    async fn get(&self, chat_id: ChatId) -> Result<Option<ChatSettings>, SettingsError> {
        Ok(self.chats.read().await.get(&chat_id).cloned())
    }

    async fn upsert(&self, settings: &ChatSettings) -> Result<ChatSettings, SettingsError> {
        self.chats
            .write()
            .await
            .insert(settings.chat_id, settings.clone());
        Ok(settings.clone())
    }
}

/// The in-memory store is always reachable
pub struct InMemoryHealth;

#[async_trait]
impl StoreHealthPort for InMemoryHealth {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), SettingsError> {
        Ok(())
    }
}
