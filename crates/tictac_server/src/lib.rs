//! Server-authoritative tic-tac-toe.
//!
//! Games live in a [`GameStore`]; the [`GameEngine`] is the only writer and
//! applies each move as a read, validate, conditional-write cycle so that
//! concurrent requests against one game serialize cleanly. Accounts, tokens
//! and the HTTP surface sit around the engine and talk to it through
//! [`AccountId`] and [`WinNotifier`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accounts;
mod api;
mod auth;
mod cli;
mod config;
mod db;
mod game;
mod identity;

pub use accounts::{
    Account, AccountError, AccountRepository, AccountWorker, ChannelNotifier, DEFAULT_HASH_ROUNDS,
    PasswordError, account_channel, hash_password, verify_password,
};
pub use api::{
    ApiError, AppState, Authenticated, CredentialsRequest, GameCreatedResponse, LoginResponse,
    MOVE_FIELDS_REQUIRED, MessageResponse, MoveRequest, MoveResponse, RegisterResponse, UserView,
    router,
};
pub use auth::{AuthError, AuthService, Claims, IdentityResolver, TokenSigner};
pub use cli::{Cli, Command};
pub use config::{
    ConfigError, ENV_DATABASE, ENV_HOST, ENV_PORT, ENV_SECRET_KEY, MAX_TOKEN_TTL_MINUTES,
    ServerConfig,
};
pub use db::{Database, DbError};
pub use game::{
    AccountCommand, DEFAULT_MAX_ATTEMPTS, EngineError, FIRST_PLY, GameEngine, GameId, GameRecord,
    GameStore, InMemoryGameStore, MovePolicy, NewGame, NotifyError, OpenSeating,
    RecordingNotifier, SqliteGameStore, SwapOutcome, WinNotifier,
};
pub use identity::AccountId;
