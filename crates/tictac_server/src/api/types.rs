//! Request and response bodies.

use derive_new::new;
use serde::{Deserialize, Serialize};
use tictac_rules::{Board, Outcome};

use crate::accounts::Account;
use crate::game::{GameId, GameRecord};

/// Body of `/auth/register` and `/auth/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsRequest {
    /// Account name.
    pub username: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Both fields, if both are present and non-empty.
    pub fn complete(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }
}

/// Body of `/game/move`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoveRequest {
    /// Target game.
    pub game_id: Option<i64>,
    /// Cell index, 0 through 8.
    #[serde(rename = "move")]
    pub cell: Option<i64>,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    id: i32,
    username: String,
    wins: i32,
}

impl From<&Account> for UserView {
    fn from(account: &Account) -> Self {
        Self {
            id: *account.id(),
            username: account.username().clone(),
            wins: *account.wins(),
        }
    }
}

/// Plain `{"message": ...}` body.
#[derive(Debug, Clone, Serialize, new)]
pub struct MessageResponse {
    message: String,
}

/// Successful registration.
#[derive(Debug, Clone, Serialize, new)]
pub struct RegisterResponse {
    message: String,
    user: UserView,
}

/// Successful login.
#[derive(Debug, Clone, Serialize, new)]
pub struct LoginResponse {
    status: &'static str,
    token: String,
    user: UserView,
}

/// A newly created game.
#[derive(Debug, Clone, Serialize, new)]
pub struct GameCreatedResponse {
    game_id: GameId,
}

/// Game state after an accepted move.
#[derive(Debug, Clone, Serialize)]
pub struct MoveResponse {
    game_id: GameId,
    board: Board,
    winner: Option<Outcome>,
}

impl From<GameRecord> for MoveResponse {
    fn from(record: GameRecord) -> Self {
        Self {
            game_id: *record.id(),
            board: *record.board(),
            winner: *record.winner(),
        }
    }
}
