//! Persisted game state.

use derive_getters::Getters;
use serde::Serialize;
use tictac_rules::{Board, Mark, Outcome};
use tracing::instrument;

use crate::AccountId;
use crate::db::DbError;
use crate::db::models::GameRow;

/// Unique identifier for a game, assigned by the store.
pub type GameId = i32;

/// First ply of every game.
pub const FIRST_PLY: i32 = 1;

/// One game's full state as held by a [`GameStore`](crate::GameStore).
///
/// `ply` is the only record of whose turn it is: odd plies belong to X,
/// even plies to O. Once `winner` is set the record never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct GameRecord {
    id: GameId,
    owner_id: AccountId,
    board: Board,
    ply: i32,
    winner: Option<Outcome>,
}

impl GameRecord {
    /// Reassembles a record from its parts.
    pub(crate) fn from_parts(
        id: GameId,
        owner_id: AccountId,
        board: Board,
        ply: i32,
        winner: Option<Outcome>,
    ) -> Self {
        Self {
            id,
            owner_id,
            board,
            ply,
            winner,
        }
    }

    /// True once the game has a winner or ended in a draw.
    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Mark that plays the next ply.
    pub fn to_move(&self) -> Mark {
        Mark::for_ply(self.ply)
    }

    /// Returns the record after one accepted move.
    #[instrument(skip(self), fields(game_id = self.id, ply = self.ply))]
    pub fn advanced(&self, board: Board, winner: Option<Outcome>) -> Self {
        Self {
            id: self.id,
            owner_id: self.owner_id,
            board,
            ply: self.ply + 1,
            winner,
        }
    }
}

impl TryFrom<GameRow> for GameRecord {
    type Error = DbError;

    #[track_caller]
    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        let board = Board::decode(&row.board)?;
        let winner = row.winner.as_deref().map(str::parse::<Outcome>).transpose()?;
        Ok(Self::from_parts(
            row.id,
            AccountId::new(row.owner_id),
            board,
            row.ply,
            winner,
        ))
    }
}

/// A game about to be created; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct NewGame {
    owner_id: AccountId,
    board: Board,
    ply: i32,
    winner: Option<Outcome>,
}

impl NewGame {
    /// A fresh game: empty board, first ply, no winner.
    #[instrument]
    pub fn fresh(owner_id: AccountId) -> Self {
        Self {
            owner_id,
            board: Board::new(),
            ply: FIRST_PLY,
            winner: None,
        }
    }

    /// Attaches the store-assigned id.
    pub(crate) fn into_record(self, id: GameId) -> GameRecord {
        GameRecord::from_parts(id, self.owner_id, self.board, self.ply, self.winner)
    }
}
