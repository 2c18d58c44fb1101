//! The 3x3 board and its stored text form.

use crate::types::{Cell, Mark};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Errors raised while reading, writing or decoding a board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Encoded board does not have exactly nine characters.
    #[display("Board encoding must be 9 characters, got {length}")]
    InvalidLength {
        /// Number of characters received.
        length: usize,
    },

    /// Encoded board contains something other than `' '`, `'X'` or `'O'`.
    #[display("Invalid board character {found:?} at index {index}")]
    InvalidCharacter {
        /// Position of the offending character.
        index: usize,
        /// The character found.
        found: char,
    },

    /// Cell index outside `0..=8`.
    #[display("Cell index {index} is outside 0..=8")]
    IndexOutOfRange {
        /// Index requested.
        index: usize,
    },
}

impl BoardError {
    /// True for malformed encodings, false for bad cell indices.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            BoardError::InvalidLength { .. } | BoardError::InvalidCharacter { .. }
        )
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells are stored in row-major order, index 0 top-left through 8 bottom-right.
/// Serializes as a nine-element array of `" "`, `"X"` and `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Returns the cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfRange`] if `index` is greater than 8.
    #[instrument(skip(self))]
    pub fn get(&self, index: usize) -> Result<Cell, BoardError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(BoardError::IndexOutOfRange { index })
    }

    /// Returns a copy of this board with `cell` written at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfRange`] if `index` is greater than 8.
    #[instrument(skip(self))]
    pub fn with(mut self, index: usize, cell: Cell) -> Result<Self, BoardError> {
        let slot = self
            .cells
            .get_mut(index)
            .ok_or(BoardError::IndexOutOfRange { index })?;
        *slot = cell;
        Ok(self)
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(Cell::Empty))
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| c.mark() == Some(mark)).count()
    }

    /// Encodes the board as nine characters, one per cell.
    #[instrument(skip(self))]
    pub fn encode(&self) -> String {
        self.cells.iter().map(|c| c.to_char()).collect()
    }

    /// Decodes a board from its nine-character form.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidLength`] unless the input has exactly nine characters,
    /// or [`BoardError::InvalidCharacter`] for anything outside `' '`, `'X'`, `'O'`.
    #[instrument]
    pub fn decode(encoded: &str) -> Result<Self, BoardError> {
        let length = encoded.chars().count();
        if length != CELL_COUNT {
            return Err(BoardError::InvalidLength { length });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (index, (slot, found)) in cells.iter_mut().zip(encoded.chars()).enumerate() {
            *slot = Cell::from_char(found).ok_or(BoardError::InvalidCharacter { index, found })?;
        }
        Ok(Self { cells })
    }

    /// Formats the board as a human-readable grid, numbering empty cells.
    pub fn render(&self) -> String {
        let mut result = String::new();
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            let line: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Cell::Empty => (row * 3 + col).to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                })
                .collect();
            result.push_str(&line.join("|"));
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::decode(s)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_numbers_empty_cells() {
        let board = Board::new()
            .with(4, Cell::Occupied(Mark::X))
            .expect("in range");
        assert_eq!(board.render(), "0|1|2\n-+-+-\n3|X|5\n-+-+-\n6|7|8");
    }

    #[test]
    fn test_decode_counts_characters_not_bytes() {
        let result = Board::decode("XXXXXXXXé");
        assert_eq!(
            result,
            Err(BoardError::InvalidCharacter {
                index: 8,
                found: 'é'
            })
        );
    }

    #[test]
    fn test_error_kinds() {
        assert!(BoardError::InvalidLength { length: 3 }.is_format());
        assert!(!BoardError::IndexOutOfRange { index: 9 }.is_format());
    }
}
