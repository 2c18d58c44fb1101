//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mark placed by a player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Mark {
    /// Plays odd plies (the game's creator).
    X,
    /// Plays even plies.
    O,
}

impl Mark {
    /// Returns the mark that moves on the given ply.
    ///
    /// Plies are 1-based: ply 1 is X, ply 2 is O, and so on.
    #[instrument]
    pub fn for_ply(ply: i32) -> Self {
        if ply.rem_euclid(2) == 1 { Mark::X } else { Mark::O }
    }
}

/// A single cell of the board.
///
/// Serialized as the one-character string used on the wire: `" "`, `"X"` or `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Cell {
    /// No mark yet.
    #[default]
    Empty,
    /// Holds a mark.
    Occupied(Mark),
}

impl Cell {
    /// Character used in the encoded board form.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Occupied(Mark::X) => 'X',
            Cell::Occupied(Mark::O) => 'O',
        }
    }

    /// Parses a cell from its encoded character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Cell::Empty),
            'X' => Some(Cell::Occupied(Mark::X)),
            'O' => Some(Cell::Occupied(Mark::O)),
            _ => None,
        }
    }

    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Occupied(mark)
    }
}

impl From<Cell> for char {
    fn from(cell: Cell) -> Self {
        cell.to_char()
    }
}

/// Character that does not encode a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("{_0:?} is not a board cell (expected ' ', 'X' or 'O')")]
pub struct UnknownCell(#[error(not(source))] pub char);

impl TryFrom<char> for Cell {
    type Error = UnknownCell;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Cell::from_char(c).ok_or(UnknownCell(c))
    }
}
