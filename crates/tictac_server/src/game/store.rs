//! Persistence boundary for game records.

use crate::db::DbError;
use crate::game::{GameId, GameRecord, NewGame};

/// Result of a conditional update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The stored ply matched and the new record was written.
    Committed,
    /// Another writer advanced the game first; nothing was written.
    Conflict,
}

/// Sole owner and mutator of stored game records.
///
/// Writes go through [`compare_and_swap`](GameStore::compare_and_swap), which only
/// succeeds while the stored `ply` equals the one the caller read. Callers that
/// read, validate and write back therefore never overwrite a move they did not see.
pub trait GameStore: Send + Sync + std::fmt::Debug {
    /// Persists a new game and returns it with its assigned id.
    ///
    /// Ids are unique and strictly greater than every id this store issued before.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store is unavailable.
    fn create(&self, game: NewGame) -> Result<GameRecord, DbError>;

    /// Fetches a game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store is unavailable or the row is corrupt.
    fn fetch(&self, id: GameId) -> Result<Option<GameRecord>, DbError>;

    /// Replaces the stored record for `next.id()` if its ply is still `expected_ply`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store is unavailable.
    fn compare_and_swap(&self, next: &GameRecord, expected_ply: i32) -> Result<SwapOutcome, DbError>;
}
