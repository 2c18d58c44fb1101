//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Mark};
use tracing::instrument;

/// The eight winning lines, in evaluation order.
///
/// Rows first, then columns, then the two diagonals. When more than one line is
/// complete the earliest entry decides.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark of the first complete line in [`LINES`] order,
/// `None` otherwise.
#[instrument(level = "trace")]
pub fn check_winner(board: &Board) -> Option<Mark> {
    let cells = board.cells();
    LINES.iter().find_map(|&[a, b, c]| match cells[a] {
        Cell::Occupied(mark) if cells[b] == cells[a] && cells[c] == cells[a] => Some(mark),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(marks: &[(usize, Mark)]) -> Board {
        marks.iter().fold(Board::new(), |board, &(i, mark)| {
            board.with(i, Cell::Occupied(mark)).expect("index in range")
        })
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(&[(0, Mark::X), (1, Mark::X), (2, Mark::X)]);
        assert_eq!(check_winner(&board), Some(Mark::X));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(&[(2, Mark::O), (4, Mark::O), (6, Mark::O)]);
        assert_eq!(check_winner(&board), Some(Mark::O));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(&[(0, Mark::X), (1, Mark::X), (2, Mark::O)]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_first_line_in_order_decides() {
        // Top row (line 0) and bottom row (line 2) both complete.
        let board = board_with(&[
            (0, Mark::O),
            (1, Mark::O),
            (2, Mark::O),
            (6, Mark::X),
            (7, Mark::X),
            (8, Mark::X),
        ]);
        assert_eq!(check_winner(&board), Some(Mark::O));
    }
}
