//! TgBot Admin - Control plane for the Telegram chat bot
//!
//! The process:
//! - Serves the settings REST API (global and per-chat settings)
//! - Keeps settings in SQLite (or in memory)
//! - Hosts the Telegram bot when a token is configured
//! - Optionally serves the built admin portal

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;
use crate::infrastructure::telegram::spawn_bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tgbot_admin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TgBot Admin");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Store: {:?}", config.store_backend);
    tracing::info!("  Bot: {}", if config.bot_token.is_some() { "enabled" } else { "disabled" });

    // Initialize application state
    let mut state = AppState::new(config).await?;
    tracing::info!("Application state initialized");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                    shutdown.cancel();
                }
                Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
            }
        }
    });

    // Start the bot alongside the API
    let bot_task = match state.config.bot_token.as_deref() {
        Some(token) => {
            let bot = spawn_bot(token, shutdown.clone(), state.config.bot_shutdown_grace());
            state.bot_state = Some(bot.state);
            Some(bot.task)
        }
        None => {
            tracing::info!("No bot token configured, Telegram bot not started");
            None
        }
    };
    let state = Arc::new(state);

    // Build the router
    let mut app = http::create_routes();
    if let Some(portal_dir) = &state.config.portal_dir {
        tracing::info!("Serving admin portal from {}", portal_dir.display());
        app = app.fallback_service(ServeDir::new(portal_dir));
    }
    let app = app
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state.clone());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .await;
    if let Err(e) = &served {
        tracing::error!("Server error: {}", e);
    }

    // Stop the bot whether the server exited cleanly or not
    shutdown.cancel();
    if let Some(task) = bot_task {
        if let Err(e) = task.await {
            tracing::error!("Bot task failed: {}", e);
        }
    }

    tracing::info!("Stopped");
    served.map_err(Into::into)
}
