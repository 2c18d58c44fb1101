//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. They hold no state and never fail:
//! every `Board` value is a well-formed 3x3 grid.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use crate::{Board, Outcome};
use tracing::instrument;

/// Evaluates a board.
///
/// Returns the winner of the first complete line in [`LINES`] order, `Draw` when the
/// board is full with no complete line, and `None` while the game can continue.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> Option<Outcome> {
    if let Some(mark) = check_winner(board) {
        return Some(Outcome::Winner(mark));
    }

    if is_full(board) {
        return Some(Outcome::Draw);
    }

    None
}
