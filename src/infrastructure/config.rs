//! Application configuration
//!
//! Values come from `TGBOT_*` environment variables (after `.env` is loaded),
//! layered over the defaults below.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "TGBOT";

/// Which settings store implementation to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid configuration: {}", .0.join("; "))]
pub struct ConfigError(pub Vec<String>);

/// Application configuration loaded from environment
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP API port
    pub server_port: u16,

    /// Settings store backend
    pub store_backend: StoreBackend,
    /// Full SQLite connection string. Derived from `data_dir` and
    /// `database_name` when unset.
    pub database_url: Option<String>,
    pub data_dir: String,
    pub database_name: String,
    /// Connection acquire timeout for store requests
    pub store_timeout_secs: u64,

    /// Telegram bot token. The bot does not run without one.
    pub bot_token: Option<String>,
    /// How long the bot may take to stop before its task is aborted
    pub bot_shutdown_grace_secs: u64,

    /// Built admin portal to serve as static files
    pub portal_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    fn load(environment: Environment) -> Result<Self> {
        let config: AppConfig = Config::builder()
            .set_default("server_port", 3000)?
            .set_default("store_backend", "sqlite")?
            .set_default("data_dir", "data")?
            .set_default("database_name", "tgbot_admin")?
            .set_default("store_timeout_secs", 2)?
            .set_default("bot_shutdown_grace_secs", 10)?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Collect every problem instead of stopping at the first
    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        match &self.database_url {
            Some(url) if !url.starts_with("sqlite:") => {
                errors.push(format!(
                    "{}_DATABASE_URL must be a sqlite: connection string",
                    ENV_PREFIX
                ));
            }
            Some(_) => {}
            None => {
                if self.database_name.trim().is_empty() {
                    errors.push(format!("{}_DATABASE_NAME must be provided.", ENV_PREFIX));
                } else if self.database_name.contains(['/', '\\']) {
                    errors.push(format!(
                        "{}_DATABASE_NAME must not contain path separators.",
                        ENV_PREFIX
                    ));
                }
                if self.data_dir.trim().is_empty() {
                    errors.push(format!("{}_DATA_DIR must be provided.", ENV_PREFIX));
                }
            }
        }

        if self.store_timeout_secs == 0 {
            errors.push(format!(
                "{}_STORE_TIMEOUT_SECS must be greater than 0.",
                ENV_PREFIX
            ));
        }

        if let Some(token) = &self.bot_token {
            if token.trim().is_empty() {
                errors.push(format!("{}_BOT_TOKEN must not be blank.", ENV_PREFIX));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError(errors))
        }
    }

    /// Connection string of the SQLite settings database
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!(
                "sqlite://{}/{}.db?mode=rwc",
                self.data_dir.trim_end_matches('/'),
                self.database_name
            ),
        }
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    pub fn bot_shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.bot_shutdown_grace_secs)
    }

    /// In-memory configuration for tests
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            server_port: 0,
            store_backend: StoreBackend::Memory,
            database_url: None,
            data_dir: "data".to_string(),
            database_name: "tgbot_admin".to_string(),
            store_timeout_secs: 2,
            bot_token: None,
            bot_shutdown_grace_secs: 1,
            portal_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::load(Environment::with_prefix(ENV_PREFIX).source(Some(source)))
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.store_backend, StoreBackend::Sqlite);
        assert_eq!(config.store_timeout(), Duration::from_secs(2));
        assert_eq!(config.bot_shutdown_grace(), Duration::from_secs(10));
        assert!(config.bot_token.is_none());
        assert!(config.portal_dir.is_none());
        assert_eq!(config.database_url(), "sqlite://data/tgbot_admin.db?mode=rwc");
    }

    #[test]
    fn test_environment_overrides() {
        let config = load(&[
            ("TGBOT_SERVER_PORT", "8080"),
            ("TGBOT_STORE_BACKEND", "memory"),
            ("TGBOT_DATA_DIR", "/var/lib/tgbot/"),
            ("TGBOT_DATABASE_NAME", "admin"),
            ("TGBOT_BOT_TOKEN", "123456:ABC-DEF"),
        ])
        .unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.bot_token.as_deref(), Some("123456:ABC-DEF"));
        assert_eq!(config.database_url(), "sqlite:///var/lib/tgbot/admin.db?mode=rwc");
    }

    #[test]
    fn test_explicit_database_url_wins() {
        let config = load(&[("TGBOT_DATABASE_URL", "sqlite::memory:")]).unwrap();
        assert_eq!(config.database_url(), "sqlite::memory:");
    }

    #[test]
    fn test_rejects_non_sqlite_url() {
        let err = load(&[("TGBOT_DATABASE_URL", "postgres://localhost/admin")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_reports_all_problems() {
        let err = load(&[
            ("TGBOT_DATABASE_NAME", " "),
            ("TGBOT_STORE_TIMEOUT_SECS", "0"),
            ("TGBOT_BOT_TOKEN", "  "),
        ])
        .unwrap_err();

        let config_error = err.downcast_ref::<ConfigError>().unwrap();
        assert_eq!(config_error.0.len(), 3);
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(load(&[("TGBOT_STORE_BACKEND", "mongo")]).is_err());
    }
}
