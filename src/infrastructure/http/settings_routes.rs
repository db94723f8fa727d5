//! Global settings API routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use super::ApiError;
use crate::application::dto::{ApiResponse, GlobalSettingsPatch};
use crate::domain::entities::GlobalSettings;
use crate::infrastructure::state::AppState;

/// Get the global settings
pub async fn get_global_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<GlobalSettings>>, ApiError> {
    let settings = state.global_settings_service.get().await?;
    Ok(Json(ApiResponse::ok(settings)))
}

/// Patch the global settings with the fields present in the body
pub async fn update_global_settings(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GlobalSettingsPatch>, JsonRejection>,
) -> Result<Json<ApiResponse<GlobalSettings>>, ApiError> {
    let Json(patch) = payload?;
    let settings = state.global_settings_service.update(patch).await?;
    Ok(Json(ApiResponse::ok(settings)))
}
