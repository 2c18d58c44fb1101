//! Tests for board evaluation across every possible board.

use strum::IntoEnumIterator;
use tictac_rules::{Board, Cell, LINES, Mark, Outcome, evaluate};

/// Every assignment of {Empty, X, O} to the nine cells (3^9 boards).
fn all_boards() -> impl Iterator<Item = Board> {
    (0..3u32.pow(9)).map(|mut n| {
        let mut board = Board::new();
        for index in 0..9 {
            let cell = match n % 3 {
                0 => Cell::Empty,
                1 => Cell::Occupied(Mark::X),
                _ => Cell::Occupied(Mark::O),
            };
            board = board.with(index, cell).expect("index in range");
            n /= 3;
        }
        board
    })
}

/// Indices of lines fully held by a single mark.
fn completed_lines(board: &Board) -> Vec<(usize, Mark)> {
    LINES
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let marks: Vec<_> = line
                .iter()
                .map(|&c| board.get(c).expect("index in range").mark())
                .collect();
            match marks.as_slice() {
                [Some(a), Some(b), Some(c)] if a == b && b == c => Some((i, *a)),
                _ => None,
            }
        })
        .collect()
}

#[test]
fn test_single_completed_line_returns_its_mark() {
    for board in all_boards() {
        let lines = completed_lines(&board);
        if let [(_, mark)] = lines.as_slice() {
            assert_eq!(evaluate(&board), Some(Outcome::Winner(*mark)), "{board:?}");
        }
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut seen = 0;
    for board in all_boards() {
        let full = board.cells().iter().all(|c| *c != Cell::Empty);
        if full && completed_lines(&board).is_empty() {
            seen += 1;
            assert_eq!(evaluate(&board), Some(Outcome::Draw), "{board:?}");
        }
    }
    assert!(seen > 0);
}

#[test]
fn test_open_board_without_line_is_undecided() {
    for board in all_boards() {
        let open = board.cells().iter().any(|c| *c == Cell::Empty);
        if open && completed_lines(&board).is_empty() {
            assert_eq!(evaluate(&board), None, "{board:?}");
        }
    }
}

#[test]
fn test_multiple_lines_take_lowest_index() {
    for board in all_boards() {
        let lines = completed_lines(&board);
        if let Some(&(_, first)) = lines.first() {
            assert_eq!(evaluate(&board), Some(Outcome::Winner(first)), "{board:?}");
        }
    }
}

#[test]
fn test_every_line_wins_for_both_marks() {
    for mark in Mark::iter() {
        for line in LINES {
            let board = line.iter().fold(Board::new(), |b, &i| {
                b.with(i, Cell::Occupied(mark)).expect("index in range")
            });
            assert_eq!(evaluate(&board), Some(Outcome::Winner(mark)));
        }
    }
}

#[test]
fn test_outcome_text_form() {
    assert_eq!(Outcome::Winner(Mark::X).as_str(), "X");
    assert_eq!("Draw".parse::<Outcome>(), Ok(Outcome::Draw));
    assert!("draw".parse::<Outcome>().is_err());
    assert_eq!(
        serde_json::to_value(Outcome::Winner(Mark::O)).expect("serialize"),
        serde_json::json!("O")
    );
}
