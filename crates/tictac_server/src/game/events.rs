//! Commands the engine sends to the account collaborator.

use derive_more::{Display, Error};
use std::sync::{Arc, Mutex};

use crate::AccountId;
use crate::game::GameId;

/// Command for the account collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCommand {
    /// Credit one win to `account`, earned in `game_id`.
    IncrementWins {
        /// Account to credit.
        account: AccountId,
        /// Game that was won.
        game_id: GameId,
    },
}

/// The account collaborator stopped accepting commands.
#[derive(Debug, Clone, Display, Error)]
#[display("Account collaborator unavailable: {reason}")]
pub struct NotifyError {
    /// Why delivery failed.
    pub reason: String,
}

/// Outbound port for account commands.
///
/// Delivery happens after the game record is committed; a failure here never
/// rolls the move back.
pub trait WinNotifier: Send + Sync + std::fmt::Debug {
    /// Hands a command to the account collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the collaborator can no longer receive commands.
    fn notify(&self, command: AccountCommand) -> Result<(), NotifyError>;
}

/// Notifier that keeps every command it receives.
///
/// Useful where no account collaborator is running, such as tests and tools.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    commands: Arc<Mutex<Vec<AccountCommand>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far, oldest first.
    pub fn commands(&self) -> Vec<AccountCommand> {
        match self.commands.lock() {
            Ok(commands) => commands.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl WinNotifier for RecordingNotifier {
    fn notify(&self, command: AccountCommand) -> Result<(), NotifyError> {
        self.commands
            .lock()
            .map_err(|_| NotifyError {
                reason: "recorder lock poisoned".to_string(),
            })?
            .push(command);
        Ok(())
    }
}
