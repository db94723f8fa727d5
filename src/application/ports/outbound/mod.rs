//! Outbound ports - Interfaces that the application requires from external systems

mod settings_port;

pub use settings_port::{
    ChatSettingsRepositoryPort, GlobalSettingsRepositoryPort, SettingsError, StoreHealthPort,
};
