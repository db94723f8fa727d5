//! Telegram bot process
//!
//! The bot runs as a background task of the API process. It currently echoes
//! every text message back to the chat it came from.

mod bot;
mod lifecycle;

pub use lifecycle::BotState;

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use bot::TelegramBot;

/// A running bot task and its published state
pub struct BotHandle {
    pub task: JoinHandle<()>,
    pub state: watch::Receiver<BotState>,
}

/// Run the bot until `shutdown` is cancelled. Failures are logged and the bot
/// stays down; the API keeps serving.
pub fn spawn_bot(token: &str, shutdown: CancellationToken, grace: Duration) -> BotHandle {
    let bot = TelegramBot::new(token);
    let state = bot.lifecycle().subscribe();
    let task = tokio::spawn(async move {
        if let Err(e) = bot.run(shutdown, grace).await {
            tracing::error!("Telegram bot stopped with error: {}", e);
        }
    });

    BotHandle { task, state }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawned_bot_publishes_final_state() {
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        let handle = spawn_bot("123456:TEST-TOKEN", shutdown, Duration::from_secs(1));
        handle.task.await.unwrap();

        assert_eq!(*handle.state.borrow(), BotState::Stopped);
    }
}
