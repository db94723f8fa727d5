use async_trait::async_trait;

use crate::application::validation::ValidationErrors;
use crate::domain::entities::{ChatSettings, GlobalSettings};
use crate::domain::value_objects::ChatId;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<ValidationErrors> for SettingsError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Accessor for the singleton global settings record. There is no key
/// parameter: implementations always address the reserved id.
#[async_trait]
pub trait GlobalSettingsRepositoryPort: Send + Sync {
    /// `None` when the record has not been seeded yet
    async fn get(&self) -> Result<Option<GlobalSettings>, SettingsError>;
    /// Replace the whole record, creating it if absent
    async fn upsert(&self, settings: &GlobalSettings) -> Result<GlobalSettings, SettingsError>;
}

#[async_trait]
pub trait ChatSettingsRepositoryPort: Send + Sync {
    /// All chat records ordered by chat id ascending
    async fn list(&self) -> Result<Vec<ChatSettings>, SettingsError>;
    async fn get(&self, chat_id: ChatId) -> Result<Option<ChatSettings>, SettingsError>;
    /// Replace the record at `settings.chat_id`, creating it if absent
    async fn upsert(&self, settings: &ChatSettings) -> Result<ChatSettings, SettingsError>;
}

#[async_trait]
pub trait StoreHealthPort: Send + Sync {
    /// Short name of the backing store, used in health reports
    fn name(&self) -> &'static str;
    async fn ping(&self) -> Result<(), SettingsError>;
}
