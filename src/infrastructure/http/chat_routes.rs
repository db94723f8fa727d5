//! Chat settings API routes

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use super::ApiError;
use crate::application::dto::ChatSettingsPatch;
use crate::domain::entities::ChatSettings;
use crate::domain::value_objects::ChatId;
use crate::infrastructure::state::AppState;

/// A path segment that is not an integer names no chat
fn parse_chat_id(raw: &str) -> Result<ChatId, ApiError> {
    raw.parse().map_err(|_| chat_not_found())
}

fn chat_not_found() -> ApiError {
    ApiError::NotFound("Chat not found".to_string())
}

/// List all configured chats, ordered by chat id
pub async fn list_chats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatSettings>>, ApiError> {
    let chats = state.chat_settings_service.list().await?;
    Ok(Json(chats))
}

/// Get a chat's settings
pub async fn get_chat_settings(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> Result<Json<ChatSettings>, ApiError> {
    let chat_id = parse_chat_id(&chat_id)?;

    let settings = state
        .chat_settings_service
        .get(chat_id)
        .await?
        .ok_or_else(chat_not_found)?;

    Ok(Json(settings))
}

/// Patch a chat's settings, creating the record on first write
pub async fn update_chat_settings(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
    payload: Result<Json<ChatSettingsPatch>, JsonRejection>,
) -> Result<Json<ChatSettings>, ApiError> {
    let chat_id = parse_chat_id(&chat_id)?;
    let Json(patch) = payload?;
    let settings = state.chat_settings_service.update(chat_id, patch).await?;
    Ok(Json(settings))
}
