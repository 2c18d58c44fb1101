//! The game state machine.
//!
//! A game is `InProgress` while its record has no winner and `Decided` once it
//! does. Every call re-reads the authoritative record from the store; nothing
//! is cached between calls.

use derive_more::{Display, Error, From};
use std::sync::Arc;
use tictac_rules::{Board, BoardError, Cell, Mark, Outcome, evaluate};
use tracing::{debug, error, info, instrument, warn};

use crate::AccountId;
use crate::db::DbError;
use crate::game::{
    AccountCommand, GameId, GameRecord, GameStore, MovePolicy, NewGame, OpenSeating, SwapOutcome,
    WinNotifier,
};

/// Default number of read-validate-write attempts per move.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

/// Errors surfaced by [`GameEngine`].
#[derive(Debug, Display, Error, From)]
pub enum EngineError {
    /// No game with this id exists.
    #[display("Game {game_id} not found")]
    NotFound {
        /// Requested id.
        game_id: GameId,
    },

    /// The game is decided; carries its final state.
    #[display("Game {game_id} already has a winner: {winner}")]
    GameOver {
        /// Requested id.
        game_id: GameId,
        /// Final board.
        board: Board,
        /// Final result.
        winner: Outcome,
    },

    /// The target cell is already occupied.
    #[display("Cell {cell} is already occupied")]
    IllegalMove {
        /// Requested cell.
        cell: usize,
    },

    /// The move policy refused this caller.
    #[display("Account {mover} may not play {mark}")]
    MoveRefused {
        /// Caller.
        mover: AccountId,
        /// Mark that was due.
        mark: Mark,
    },

    /// Bad cell index or board encoding.
    #[display("{_0}")]
    #[from]
    Board(BoardError),

    /// Persistence failure.
    #[display("{_0}")]
    #[from]
    Store(DbError),
}

/// Tic-tac-toe engine over a [`GameStore`].
///
/// Moves are applied with optimistic concurrency: the engine reads a record,
/// validates and computes the next one, then writes it back only if the stored
/// ply is unchanged. On conflict it starts over from a fresh read.
#[derive(Debug, Clone)]
pub struct GameEngine {
    store: Arc<dyn GameStore>,
    notifier: Arc<dyn WinNotifier>,
    policy: Arc<dyn MovePolicy>,
    max_attempts: u32,
}

impl GameEngine {
    /// Creates an engine with [`OpenSeating`] and the default attempt budget.
    #[instrument(skip(store, notifier))]
    pub fn new(store: Arc<dyn GameStore>, notifier: Arc<dyn WinNotifier>) -> Self {
        info!("Creating GameEngine");
        Self {
            store,
            notifier,
            policy: Arc::new(OpenSeating),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Replaces the move policy.
    pub fn with_policy(mut self, policy: Arc<dyn MovePolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Sets how many times a contended move is retried before giving up (at least one).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Creates a game owned by `creator`, who plays X.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the store fails.
    #[instrument(skip(self))]
    pub fn create_game(&self, creator: AccountId) -> Result<GameRecord, EngineError> {
        let record = self.store.create(NewGame::fresh(creator))?;
        info!(game_id = record.id(), owner_id = %creator, "Game started");
        Ok(record)
    }

    /// Applies a move at `cell` on behalf of `mover`.
    ///
    /// The mark is X on odd plies and O on even plies, whoever the caller is.
    ///
    /// # Errors
    ///
    /// In order of checking: [`EngineError::NotFound`], [`EngineError::GameOver`],
    /// [`EngineError::MoveRefused`], [`EngineError::Board`] for an index outside 0..=8,
    /// and [`EngineError::IllegalMove`]. [`EngineError::Store`] if the store fails or
    /// the game stays contended for the whole attempt budget. No error writes anything.
    #[instrument(skip(self))]
    pub fn apply_move(
        &self,
        game_id: GameId,
        cell: usize,
        mover: AccountId,
    ) -> Result<GameRecord, EngineError> {
        for attempt in 1..=self.max_attempts {
            let current = self
                .store
                .fetch(game_id)?
                .ok_or(EngineError::NotFound { game_id })?;

            let next = self.next_state(&current, cell, mover)?;

            match self.store.compare_and_swap(&next, *current.ply())? {
                SwapOutcome::Committed => {
                    info!(
                        game_id,
                        cell,
                        mark = %current.to_move(),
                        ply = next.ply(),
                        winner = ?next.winner(),
                        "Move applied"
                    );
                    self.announce(&current, &next);
                    return Ok(next);
                }
                SwapOutcome::Conflict => {
                    warn!(game_id, attempt, "Concurrent move detected, re-reading game");
                }
            }
        }

        Err(DbError::new(format!(
            "Game {} still contended after {} attempts",
            game_id, self.max_attempts
        ))
        .into())
    }

    /// Validates a move against `current` and computes the record that follows it.
    #[instrument(skip(self, current), fields(game_id = current.id(), ply = current.ply()))]
    fn next_state(
        &self,
        current: &GameRecord,
        cell: usize,
        mover: AccountId,
    ) -> Result<GameRecord, EngineError> {
        if let Some(winner) = *current.winner() {
            debug!(%winner, "Move on decided game rejected");
            return Err(EngineError::GameOver {
                game_id: *current.id(),
                board: *current.board(),
                winner,
            });
        }

        let mark = current.to_move();
        if !self.policy.permits(current, mover, mark) {
            return Err(EngineError::MoveRefused { mover, mark });
        }

        if current.board().get(cell)? != Cell::Empty {
            debug!(cell, "Cell occupied");
            return Err(EngineError::IllegalMove { cell });
        }

        let board = current.board().with(cell, Cell::Occupied(mark))?;
        let winner = evaluate(&board);
        Ok(current.advanced(board, winner))
    }

    /// Sends account commands for a committed transition.
    ///
    /// A decisive X win credits the game's creator. Draws and O wins send nothing.
    fn announce(&self, before: &GameRecord, after: &GameRecord) {
        let Some(outcome) = *after.winner() else {
            return;
        };
        if outcome.is_draw() {
            debug!(game_id = after.id(), "Game drawn, nobody credited");
            return;
        }
        if before.to_move() != Mark::X || outcome.winner() != Some(Mark::X) {
            return;
        }

        let command = AccountCommand::IncrementWins {
            account: *after.owner_id(),
            game_id: *after.id(),
        };
        if let Err(e) = self.notifier.notify(command) {
            error!(game_id = after.id(), error = %e, "Win credit could not be delivered");
        }
    }
}
