use std::time::Duration;

use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::lifecycle::{BotError, BotLifecycle, BotState};

/// Long-polling Telegram bot
pub struct TelegramBot {
    bot: Bot,
    lifecycle: BotLifecycle,
}

impl TelegramBot {
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
            lifecycle: BotLifecycle::new(),
        }
    }

    pub fn lifecycle(&self) -> &BotLifecycle {
        &self.lifecycle
    }

    /// Start polling and keep running until `cancel` fires. After
    /// cancellation the dispatcher gets `grace` to finish in-flight updates
    /// before its task is aborted.
    pub async fn run(&self, cancel: CancellationToken, grace: Duration) -> Result<(), BotError> {
        self.lifecycle.transition(BotState::Starting)?;

        let me = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Bot start cancelled");
                return self.stop();
            }
            me = self.bot.get_me().send() => me,
        };
        let me = match me {
            Ok(me) => me,
            Err(e) => {
                self.stop()?;
                return Err(e.into());
            }
        };
        info!("Bot {} is starting...", me.username());

        let handler = Update::filter_message().endpoint(echo_message);
        let mut dispatcher = Dispatcher::builder(self.bot.clone(), handler)
            .default_handler(|update| async move {
                debug!("Unhandled update: {:?}", update.kind);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .build();
        let shutdown = dispatcher.shutdown_token();
        let mut task = tokio::spawn(async move { dispatcher.dispatch().await });

        self.lifecycle.transition(BotState::Running)?;
        info!("Bot {} is running...", me.username());

        tokio::select! {
            _ = cancel.cancelled() => {}
            result = &mut task => {
                if let Err(e) = result {
                    error!("Bot dispatcher task failed: {}", e);
                }
                return self.stop();
            }
        }

        self.lifecycle.transition(BotState::Stopping)?;
        info!("Bot is stopping...");

        let stopped = async {
            match shutdown.shutdown() {
                Ok(done) => done.await,
                // Dispatcher never started polling
                Err(_) => task.abort(),
            }
            (&mut task).await
        };
        let outcome = timeout(grace, stopped).await;
        match outcome {
            Ok(Ok(())) => info!("Bot stopped"),
            Ok(Err(e)) if e.is_cancelled() => info!("Bot stopped before polling began"),
            Ok(Err(e)) => error!("Bot dispatcher task failed: {}", e),
            Err(_) => {
                warn!("Bot did not stop within {:?}, aborting", grace);
                task.abort();
            }
        }

        self.lifecycle.transition(BotState::Stopped)
    }

    /// Finish a run that never reached the cancellation path
    fn stop(&self) -> Result<(), BotError> {
        self.lifecycle.transition(BotState::Stopping)?;
        self.lifecycle.transition(BotState::Stopped)
    }
}

/// Reply to a text message with the same text. Send failures go to the
/// dispatcher's error handler, which logs them and keeps polling.
async fn echo_message(bot: Bot, msg: Message) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    info!(chat_id = msg.chat.id.0, "Received text '{}'", text);
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancelled_before_start_ends_stopped() {
        let bot = TelegramBot::new("123456:TEST-TOKEN");
        let cancel = CancellationToken::new();
        cancel.cancel();

        bot.run(cancel, Duration::from_secs(1)).await.unwrap();

        assert_eq!(bot.lifecycle().state(), BotState::Stopped);
    }

    #[tokio::test]
    async fn test_cannot_run_twice_concurrently() {
        let bot = TelegramBot::new("123456:TEST-TOKEN");
        bot.lifecycle().transition(BotState::Starting).unwrap();

        let result = bot.run(CancellationToken::new(), Duration::from_secs(1)).await;

        assert!(matches!(result, Err(BotError::InvalidTransition { .. })));
    }
}
