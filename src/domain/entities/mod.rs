//! Domain entities - Persisted settings records

mod chat_settings;
mod global_settings;

pub use chat_settings::ChatSettings;
pub use global_settings::GlobalSettings;
