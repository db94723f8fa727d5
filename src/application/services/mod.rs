//! Application services - Use case implementations
//!
//! Each service accepts its repository port and returns domain entities.

pub mod chat_settings_service;
pub mod global_settings_service;

pub use chat_settings_service::ChatSettingsService;
pub use global_settings_service::GlobalSettingsService;
