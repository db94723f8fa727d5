//! Error responses for the REST API

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::ports::outbound::SettingsError;
use crate::application::validation::ValidationErrors;

/// Key under which an unreadable request body is reported
const BODY_FIELD: &str = "body";

#[derive(Debug)]
pub enum ApiError {
    /// 400 with a `{field: [messages]}` body
    Validation(ValidationErrors),
    NotFound(String),
    /// 500; the cause is logged, not returned
    Internal,
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Validation(errors) => Self::Validation(errors),
            SettingsError::Database(message) => {
                tracing::error!("Settings store failure: {}", message);
                Self::Internal
            }
        }
    }
}

/// Malformed JSON, wrong field types and a missing content type are all
/// reported like any other invalid payload.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        let mut errors = ValidationErrors::new();
        errors.add(BODY_FIELD, rejection.body_text());
        Self::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
                .into_response(),
        }
    }
}
