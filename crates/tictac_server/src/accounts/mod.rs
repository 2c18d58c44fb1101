//! Registered accounts, their credentials and win tallies.

mod password;
mod repository;
mod worker;

pub use password::{DEFAULT_HASH_ROUNDS, PasswordError, hash_password, verify_password};
pub use repository::{Account, AccountError, AccountRepository};
pub use worker::{AccountWorker, ChannelNotifier, account_channel};
