//! Draw detection logic for tic-tac-toe.

use crate::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner indicates a draw.
#[instrument(level = "trace")]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}
