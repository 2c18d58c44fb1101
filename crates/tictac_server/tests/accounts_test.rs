//! Tests for account storage and the win-tally worker.

mod common;

use std::sync::Arc;

use common::{accounts, setup_test_db};
use tictac_server::{
    AccountCommand, AccountError, AccountId, GameEngine, SqliteGameStore, WinNotifier,
    account_channel,
};

#[test]
fn test_register_starts_with_zero_wins() {
    let (_db, db) = setup_test_db();
    let repo = accounts(&db);
    let account = repo.register("alice", "pw").expect("Register failed");
    assert_eq!(account.username(), "alice");
    assert_eq!(*account.wins(), 0);
    assert!(*account.id() > 0);
}

#[test]
fn test_register_duplicate_name_fails() {
    let (_db, db) = setup_test_db();
    let repo = accounts(&db);
    repo.register("bob", "pw").expect("First register failed");
    let result = repo.register("bob", "other");
    assert!(
        matches!(result, Err(AccountError::UsernameTaken { ref username }) if username == "bob"),
        "{result:?}"
    );
}

#[test]
fn test_register_requires_both_fields() {
    let (_db, db) = setup_test_db();
    let repo = accounts(&db);
    assert!(matches!(repo.register("", "pw"), Err(AccountError::MissingCredentials)));
    assert!(matches!(repo.register("carol", ""), Err(AccountError::MissingCredentials)));
}

#[test]
fn test_authenticate() {
    let (_db, db) = setup_test_db();
    let repo = accounts(&db);
    let registered = repo.register("dave", "secret").expect("Register failed");

    let found = repo
        .authenticate("dave", "secret")
        .expect("Authenticate failed")
        .expect("Credentials rejected");
    assert_eq!(found.id(), registered.id());

    assert!(repo.authenticate("dave", "wrong").expect("Authenticate failed").is_none());
    assert!(repo.authenticate("nobody", "secret").expect("Authenticate failed").is_none());
}

#[test]
fn test_password_not_serialized() {
    let (_db, db) = setup_test_db();
    let account = accounts(&db).register("erin", "secret").expect("Register failed");
    let json = serde_json::to_value(&account).expect("serialize");
    assert_eq!(json["username"], "erin");
    assert!(json.get("password_hash").is_none());
}

#[test]
fn test_increment_wins() {
    let (_db, db) = setup_test_db();
    let repo = accounts(&db);
    let account = repo.register("frank", "pw").expect("Register failed");

    assert!(repo.increment_wins(account.account_id()).expect("Increment failed"));
    assert!(repo.increment_wins(account.account_id()).expect("Increment failed"));
    assert!(!repo.increment_wins(AccountId::new(9999)).expect("Increment failed"));

    let reloaded = repo
        .find(account.account_id())
        .expect("Find failed")
        .expect("Account exists");
    assert_eq!(*reloaded.wins(), 2);
}

#[test]
fn test_worker_applies_queued_commands() {
    let (_db, db) = setup_test_db();
    let repo = accounts(&db);
    let account = repo.register("grace", "pw").expect("Register failed");

    let (notifier, worker) = account_channel(repo.clone());
    for game_id in 1..=3 {
        notifier
            .notify(AccountCommand::IncrementWins {
                account: account.account_id(),
                game_id,
            })
            .expect("Notify failed");
    }
    drop(notifier);

    assert_eq!(worker.run(), 3);
    let reloaded = repo.find(account.account_id()).expect("Find failed").expect("Account exists");
    assert_eq!(*reloaded.wins(), 3);
}

#[test]
fn test_notify_after_worker_stops_fails() {
    let (_db, db) = setup_test_db();
    let (notifier, worker) = account_channel(accounts(&db));
    drop(worker);
    let result = notifier.notify(AccountCommand::IncrementWins {
        account: AccountId::new(1),
        game_id: 1,
    });
    assert!(result.is_err());
}

#[test]
fn test_engine_win_reaches_account() {
    let (_db, db) = setup_test_db();
    let repo = accounts(&db);
    let alice = repo.register("alice", "pw").expect("Register failed");
    let bob = repo.register("bob", "pw").expect("Register failed");

    let (notifier, worker) = account_channel(repo.clone());
    let engine = GameEngine::new(Arc::new(SqliteGameStore::new(db.clone())), Arc::new(notifier));

    let game = engine.create_game(alice.account_id()).expect("Create failed");
    for (i, cell) in [0, 3, 1, 4, 2].into_iter().enumerate() {
        let mover = if i % 2 == 0 { alice.account_id() } else { bob.account_id() };
        engine.apply_move(*game.id(), cell, mover).expect("Move failed");
    }
    drop(engine);

    assert_eq!(worker.run(), 1);
    let alice = repo.find(alice.account_id()).expect("Find failed").expect("Account exists");
    let bob = repo.find(bob.account_id()).expect("Find failed").expect("Account exists");
    assert_eq!(*alice.wins(), 1);
    assert_eq!(*bob.wins(), 0);
}
