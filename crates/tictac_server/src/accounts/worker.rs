//! Applies account commands off the request path.

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::accounts::AccountRepository;
use crate::game::{AccountCommand, NotifyError, WinNotifier};

/// [`WinNotifier`] that queues commands for an [`AccountWorker`].
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<AccountCommand>,
}

impl WinNotifier for ChannelNotifier {
    fn notify(&self, command: AccountCommand) -> Result<(), NotifyError> {
        debug!(?command, "Queueing account command");
        self.tx.send(command).map_err(|_| NotifyError {
            reason: "account worker has stopped".to_string(),
        })
    }
}

/// Drains queued account commands into the repository.
#[derive(Debug)]
pub struct AccountWorker {
    rx: mpsc::UnboundedReceiver<AccountCommand>,
    accounts: AccountRepository,
}

/// Creates a connected notifier and worker pair.
pub fn account_channel(accounts: AccountRepository) -> (ChannelNotifier, AccountWorker) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelNotifier { tx }, AccountWorker { rx, accounts })
}

impl AccountWorker {
    /// Applies commands until every notifier has been dropped; returns how many succeeded.
    ///
    /// Blocks the calling thread, so run it on a blocking task.
    #[instrument(skip(self))]
    pub fn run(mut self) -> usize {
        info!("Account worker started");
        let mut applied = 0;

        while let Some(command) = self.rx.blocking_recv() {
            match command {
                AccountCommand::IncrementWins { account, game_id } => {
                    match self.accounts.increment_wins(account) {
                        Ok(true) => applied += 1,
                        Ok(false) => {}
                        Err(e) => {
                            error!(user_id = %account, game_id, error = %e, "Failed to record win")
                        }
                    }
                }
            }
        }

        info!(applied, "Account worker stopped");
        applied
    }
}
