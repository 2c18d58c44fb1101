//! Tests for board access and the stored encoding.

use tictac_rules::{Board, BoardError, Cell, Mark};

#[test]
fn test_new_board_is_nine_empty_cells() {
    let board = Board::new();
    assert_eq!(board.encode(), "         ");
    assert!(board.cells().iter().all(|c| *c == Cell::Empty));
}

#[test]
fn test_get_and_with() {
    let board = Board::new()
        .with(0, Cell::Occupied(Mark::X))
        .and_then(|b| b.with(8, Cell::Occupied(Mark::O)))
        .expect("indices in range");

    assert_eq!(board.get(0), Ok(Cell::Occupied(Mark::X)));
    assert_eq!(board.get(8), Ok(Cell::Occupied(Mark::O)));
    assert_eq!(board.get(4), Ok(Cell::Empty));
    assert_eq!(board.encode(), "X       O");
}

#[test]
fn test_with_leaves_original_untouched() {
    let original = Board::new();
    let changed = original.with(4, Mark::X.into()).expect("index in range");
    assert!(original.is_empty_at(4));
    assert!(!changed.is_empty_at(4));
}

#[test]
fn test_index_out_of_range() {
    let board = Board::new();
    assert_eq!(board.get(9), Err(BoardError::IndexOutOfRange { index: 9 }));
    assert_eq!(
        board.with(42, Cell::Occupied(Mark::X)),
        Err(BoardError::IndexOutOfRange { index: 42 })
    );
    assert!(!board.is_empty_at(9));
}

#[test]
fn test_decode_round_trip() {
    for encoded in ["         ", "XOXOXXOXO", "X   O   X", " O X O X "] {
        let board = Board::decode(encoded).expect("valid encoding");
        assert_eq!(board.encode(), encoded);
        assert_eq!(Board::decode(&board.encode()), Ok(board));
    }
}

#[test]
fn test_decode_wrong_length() {
    assert_eq!(
        Board::decode("XO"),
        Err(BoardError::InvalidLength { length: 2 })
    );
    assert_eq!(
        Board::decode("          "),
        Err(BoardError::InvalidLength { length: 10 })
    );
    assert_eq!(Board::decode(""), Err(BoardError::InvalidLength { length: 0 }));
}

#[test]
fn test_decode_invalid_character() {
    let err = "XOx      ".parse::<Board>().expect_err("lowercase is not a mark");
    assert_eq!(
        err,
        BoardError::InvalidCharacter {
            index: 2,
            found: 'x'
        }
    );
    assert!(err.is_format());
}

#[test]
fn test_board_serializes_as_cell_array() {
    let board = Board::decode("X O      ").expect("valid encoding");
    let json = serde_json::to_value(board).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!(["X", " ", "O", " ", " ", " ", " ", " ", " "])
    );

    let back: Board = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, board);
}

#[test]
fn test_board_rejects_short_array() {
    let result = serde_json::from_value::<Board>(serde_json::json!(["X", "O"]));
    assert!(result.is_err());
}

#[test]
fn test_mark_for_ply_parity() {
    assert_eq!(Mark::for_ply(1), Mark::X);
    assert_eq!(Mark::for_ply(2), Mark::O);
    assert_eq!(Mark::for_ply(9), Mark::X);
}
