//! Shared fixtures for server integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use tempfile::NamedTempFile;

use tictac_server::{
    AccountId, AccountRepository, Database, GameEngine, InMemoryGameStore, RecordingNotifier,
    SqliteGameStore,
};

/// Hashing cost for test accounts; real deployments use the default.
pub const TEST_HASH_ROUNDS: u32 = 2;

/// Creates a temporary database file with schema applied. The file handle
/// must stay in scope to keep the file alive.
pub fn setup_test_db() -> (NamedTempFile, Database) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let db = Database::open(db_path).expect("Failed to open database");
    (db_file, db)
}

/// Account repository over `db` with cheap password hashing.
pub fn accounts(db: &Database) -> AccountRepository {
    AccountRepository::new(db.clone()).with_hash_rounds(TEST_HASH_ROUNDS)
}

/// Engine over an in-memory store, with the recorder it notifies.
pub fn memory_engine() -> (GameEngine, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let engine = GameEngine::new(Arc::new(InMemoryGameStore::new()), Arc::new(notifier.clone()));
    (engine, notifier)
}

/// Engine over a fresh SQLite file, with the recorder it notifies.
pub fn sqlite_engine() -> (NamedTempFile, GameEngine, RecordingNotifier) {
    let (file, db) = setup_test_db();
    let notifier = RecordingNotifier::new();
    let engine = GameEngine::new(Arc::new(SqliteGameStore::new(db)), Arc::new(notifier.clone()));
    (file, engine, notifier)
}

pub const ALICE: AccountId = AccountId::new(1);
pub const BOB: AccountId = AccountId::new(2);
pub const CAROL: AccountId = AccountId::new(3);
