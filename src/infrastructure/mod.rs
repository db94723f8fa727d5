//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Config: Application configuration
//! - Persistence: SQLite and in-memory settings stores
//! - HTTP: REST API routes
//! - State: Shared application state
//! - Telegram: The bot process hosted alongside the API

pub mod config;
pub mod http;
pub mod persistence;
pub mod state;
pub mod telegram;
