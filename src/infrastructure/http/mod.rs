//! HTTP REST API routes

mod chat_routes;
mod error;
mod health_routes;
mod settings_routes;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use error::ApiError;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Health
        .route("/api/health", get(health_routes::health_check))
        // Global settings
        .route(
            "/api/settings/global",
            get(settings_routes::get_global_settings).put(settings_routes::update_global_settings),
        )
        // Chat settings
        .route("/api/chats", get(chat_routes::list_chats))
        .route(
            "/api/chats/{chat_id}/settings",
            get(chat_routes::get_chat_settings).put(chat_routes::update_chat_settings),
        )
}
