//! Health probe

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::infrastructure::state::AppState;
use crate::infrastructure::telegram::BotState;

/// Ordered from best to worst; the report takes the worst check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum HealthStatus {
    Healthy,
    /// Still serving, but a background part is not running
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthCheckEntry {
    pub status: HealthStatus,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub checks: BTreeMap<&'static str, HealthCheckEntry>,
}

/// Ping the settings store and report the bot state when a bot is hosted.
/// 503 only when the store is unreachable.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut checks = BTreeMap::new();

    let store = state.store_health.name();
    let store_entry = match state.store_health.ping().await {
        Ok(()) => HealthCheckEntry {
            status: HealthStatus::Healthy,
            description: format!("{}_ok", store),
        },
        Err(e) => {
            tracing::warn!("Health check failed for {}: {}", store, e);
            HealthCheckEntry {
                status: HealthStatus::Unhealthy,
                description: format!("{}_unavailable", store),
            }
        }
    };
    checks.insert(store, store_entry);

    if let Some(bot_state) = &state.bot_state {
        let bot_state = *bot_state.borrow();
        let status = match bot_state {
            BotState::Running => HealthStatus::Healthy,
            _ => HealthStatus::Degraded,
        };
        checks.insert(
            "bot",
            HealthCheckEntry {
                status,
                description: format!("bot_{}", bot_state),
            },
        );
    }

    let status = checks
        .values()
        .map(|entry| entry.status)
        .max()
        .unwrap_or(HealthStatus::Healthy);
    let code = match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let report = HealthReport { status, checks };

    (code, [(header::CACHE_CONTROL, "no-store")], Json(report))
}
