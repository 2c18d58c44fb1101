//! Tests for the game store implementations.

mod common;

use common::{ALICE, BOB, setup_test_db};
use tictac_rules::{Board, Cell, Mark, Outcome};
use tictac_server::{GameStore, InMemoryGameStore, NewGame, SqliteGameStore, SwapOutcome};

fn check_create_and_fetch(store: &dyn GameStore) {
    let first = store.create(NewGame::fresh(ALICE)).expect("Create failed");
    let second = store.create(NewGame::fresh(BOB)).expect("Create failed");
    assert!(*second.id() > *first.id());

    let fetched = store.fetch(*second.id()).expect("Fetch failed");
    assert_eq!(fetched, Some(second));
    assert_eq!(store.fetch(*first.id() + 100).expect("Fetch failed"), None);
}

fn check_swap_requires_matching_ply(store: &dyn GameStore) {
    let game = store.create(NewGame::fresh(ALICE)).expect("Create failed");

    // Two writers read the game at ply 1; the first to write wins.
    let theirs = game.advanced(mark(4), None);
    assert_eq!(
        store.compare_and_swap(&theirs, *game.ply()).expect("Swap failed"),
        SwapOutcome::Committed
    );

    let ours = game.advanced(mark(0), None);
    assert_eq!(
        store.compare_and_swap(&ours, *game.ply()).expect("Swap failed"),
        SwapOutcome::Conflict
    );

    let stored = store.fetch(*game.id()).expect("Fetch failed").expect("Game exists");
    assert_eq!(stored, theirs);
}

fn check_winner_round_trips(store: &dyn GameStore) {
    let game = store.create(NewGame::fresh(BOB)).expect("Create failed");
    let board: Board = "XXXOO    ".parse().expect("board");
    let decided = game.advanced(board, Some(Outcome::Winner(Mark::X)));
    store.compare_and_swap(&decided, *game.ply()).expect("Swap failed");

    let stored = store.fetch(*game.id()).expect("Fetch failed").expect("Game exists");
    assert!(stored.is_decided());
    assert_eq!(*stored.winner(), Some(Outcome::Winner(Mark::X)));
    assert_eq!(stored.board().encode(), "XXXOO    ");
}

fn mark(cell: usize) -> Board {
    Board::new().with(cell, Cell::Occupied(Mark::X)).expect("index")
}

#[test]
fn test_memory_create_and_fetch() {
    let store = InMemoryGameStore::new();
    assert!(store.is_empty().expect("lock"));
    check_create_and_fetch(&store);
    assert_eq!(store.len().expect("lock"), 2);
}

#[test]
fn test_sqlite_create_and_fetch() {
    let (_db, db) = setup_test_db();
    check_create_and_fetch(&SqliteGameStore::new(db));
}

#[test]
fn test_memory_swap_requires_matching_ply() {
    check_swap_requires_matching_ply(&InMemoryGameStore::new());
}

#[test]
fn test_sqlite_swap_requires_matching_ply() {
    let (_db, db) = setup_test_db();
    check_swap_requires_matching_ply(&SqliteGameStore::new(db));
}

#[test]
fn test_memory_winner_round_trips() {
    check_winner_round_trips(&InMemoryGameStore::new());
}

#[test]
fn test_sqlite_winner_round_trips() {
    let (_db, db) = setup_test_db();
    check_winner_round_trips(&SqliteGameStore::new(db));
}

#[test]
fn test_sqlite_ids_survive_reopen() {
    let (file, db) = setup_test_db();
    let first = SqliteGameStore::new(db).create(NewGame::fresh(ALICE)).expect("Create failed");

    let reopened = tictac_server::Database::open(file.path().to_str().expect("Invalid path"))
        .expect("Reopen failed");
    let store = SqliteGameStore::new(reopened);
    let second = store.create(NewGame::fresh(ALICE)).expect("Create failed");
    assert!(*second.id() > *first.id());
    assert_eq!(store.fetch(*first.id()).expect("Fetch failed"), Some(first));
}
