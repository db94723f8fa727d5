//! Shared application state

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;

use crate::application::ports::outbound::StoreHealthPort;
use crate::application::services::{ChatSettingsService, GlobalSettingsService};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::SettingsStore;
use crate::infrastructure::telegram::BotState;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// Store connectivity, for the health endpoint
    pub store_health: Arc<dyn StoreHealthPort>,
    // Application services
    pub global_settings_service: GlobalSettingsService,
    pub chat_settings_service: ChatSettingsService,
    /// Published bot state; `None` when no bot runs in this process
    pub bot_state: Option<watch::Receiver<BotState>>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store = SettingsStore::open(&config).await?;
        Ok(Self::with_store(config, store))
    }

    /// Wire services over an already opened store
    pub fn with_store(config: AppConfig, store: SettingsStore) -> Self {
        let global_settings_service = GlobalSettingsService::new(store.global_settings);
        let chat_settings_service = ChatSettingsService::new(store.chat_settings);

        Self {
            config,
            store_health: store.health,
            global_settings_service,
            chat_settings_service,
            bot_state: None,
        }
    }
}
