//! In-process game store.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

use crate::db::DbError;
use crate::game::{GameId, GameRecord, GameStore, NewGame, SwapOutcome};

#[derive(Debug, Default)]
struct Games {
    last_id: GameId,
    records: BTreeMap<GameId, GameRecord>,
}

/// Game store holding records in memory behind a single mutex.
///
/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameStore {
    games: Arc<Mutex<Games>>,
}

impl InMemoryGameStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating InMemoryGameStore");
        Self::default()
    }

    /// Number of stored games.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the lock was poisoned.
    pub fn len(&self) -> Result<usize, DbError> {
        Ok(self.lock()?.records.len())
    }

    /// True when no game has been created.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the lock was poisoned.
    pub fn is_empty(&self) -> Result<bool, DbError> {
        Ok(self.lock()?.records.is_empty())
    }

    #[track_caller]
    fn lock(&self) -> Result<MutexGuard<'_, Games>, DbError> {
        self.games
            .lock()
            .map_err(|_| DbError::new("In-memory game store lock poisoned"))
    }
}

impl GameStore for InMemoryGameStore {
    #[instrument(skip(self, game), fields(owner_id = %game.owner_id()))]
    fn create(&self, game: NewGame) -> Result<GameRecord, DbError> {
        let mut games = self.lock()?;
        games.last_id += 1;
        let record = game.into_record(games.last_id);
        games.records.insert(*record.id(), record.clone());
        info!(game_id = record.id(), "Game created");
        Ok(record)
    }

    #[instrument(skip(self))]
    fn fetch(&self, id: GameId) -> Result<Option<GameRecord>, DbError> {
        let games = self.lock()?;
        let record = games.records.get(&id).cloned();
        if record.is_none() {
            debug!(game_id = id, "Game not found");
        }
        Ok(record)
    }

    #[instrument(skip(self, next), fields(game_id = next.id(), ply = next.ply()))]
    fn compare_and_swap(&self, next: &GameRecord, expected_ply: i32) -> Result<SwapOutcome, DbError> {
        let mut games = self.lock()?;
        match games.records.get_mut(next.id()) {
            Some(stored) if *stored.ply() == expected_ply => {
                *stored = next.clone();
                debug!("Game updated");
                Ok(SwapOutcome::Committed)
            }
            Some(stored) => {
                warn!(expected_ply, stored_ply = stored.ply(), "Stored ply moved on, update skipped");
                Ok(SwapOutcome::Conflict)
            }
            None => Err(DbError::new(format!("Game {} vanished from store", next.id()))),
        }
    }
}
