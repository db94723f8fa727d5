//! Global Settings Service - Read and patch the singleton settings record

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::dto::GlobalSettingsPatch;
use crate::application::ports::outbound::{GlobalSettingsRepositoryPort, SettingsError};
use crate::application::validation::Validate;
use crate::domain::entities::GlobalSettings;
use crate::domain::value_objects::merge;

pub struct GlobalSettingsService {
    repository: Arc<dyn GlobalSettingsRepositoryPort>,
}

impl GlobalSettingsService {
    pub fn new(repository: Arc<dyn GlobalSettingsRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Current global settings. A missing record (store not seeded) yields the
    /// built-in defaults; the next update persists them.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<GlobalSettings, SettingsError> {
        match self.repository.get().await? {
            Some(settings) => {
                debug!("Loaded global settings");
                Ok(settings)
            }
            None => {
                warn!(
                    id = GlobalSettings::ID,
                    "Global settings record missing, falling back to defaults"
                );
                Ok(GlobalSettings::default())
            }
        }
    }

    /// Validate `patch`, merge it onto the current record and persist the
    /// result. Returns the merged record as written.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        patch: GlobalSettingsPatch,
    ) -> Result<GlobalSettings, SettingsError> {
        patch.validate()?;

        let current = self.get().await?;
        let merged = merge(&current, patch);
        self.repository.upsert(&merged).await?;

        info!(
            llm_model = %merged.llm_model,
            history_max_len = merged.history_max_len,
            "Updated global settings"
        );
        Ok(merged)
    }
}
