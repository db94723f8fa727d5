//! Bot lifecycle: Stopped -> Starting -> Running -> Stopping -> Stopped

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl BotState {
    /// A start may be cancelled before the bot is running, so Starting can
    /// go straight to Stopping.
    pub fn can_transition_to(self, next: BotState) -> bool {
        use BotState::*;
        matches!(
            (self, next),
            (Stopped, Starting)
                | (Starting, Running)
                | (Starting, Stopping)
                | (Running, Stopping)
                | (Stopping, Stopped)
        )
    }
}

impl std::fmt::Display for BotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BotState::Stopped => "stopped",
            BotState::Starting => "starting",
            BotState::Running => "running",
            BotState::Stopping => "stopping",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Invalid bot state transition: {from} -> {to}")]
    InvalidTransition { from: BotState, to: BotState },
    #[error("Telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),
}

/// Current bot state, observable through [`BotLifecycle::subscribe`]
pub struct BotLifecycle {
    state: watch::Sender<BotState>,
}

impl BotLifecycle {
    pub fn new() -> Self {
        let (state, _) = watch::channel(BotState::Stopped);
        Self { state }
    }

    #[cfg(test)]
    pub fn state(&self) -> BotState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<BotState> {
        self.state.subscribe()
    }

    pub fn transition(&self, next: BotState) -> Result<(), BotError> {
        let mut result = Ok(());
        self.state.send_if_modified(|state| {
            if state.can_transition_to(next) {
                tracing::debug!("Bot state {} -> {}", state, next);
                *state = next;
                true
            } else {
                result = Err(BotError::InvalidTransition {
                    from: *state,
                    to: next,
                });
                false
            }
        });
        result
    }
}

impl Default for BotLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
