//! Mapping failures to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::Display;
use serde_json::json;
use tictac_rules::{Board, Outcome};
use tracing::{error, warn};

use crate::accounts::AccountError;
use crate::auth::AuthError;
use crate::game::EngineError;

/// Message for a move request without both fields.
pub const MOVE_FIELDS_REQUIRED: &str = "Game ID, and move are required";

/// An error response.
#[derive(Debug, Display)]
pub enum ApiError {
    /// 400 with a message.
    #[display("{_0}")]
    BadRequest(String),

    /// 400 carrying a decided game's final state.
    #[display("Game already has a winner")]
    GameOver {
        /// Final board.
        board: Board,
        /// Final result.
        winner: Outcome,
    },

    /// 403 for rejected credentials.
    #[display("Login failed")]
    LoginFailed,

    /// 403 when no token was presented.
    #[display("Authentication Token is missing!")]
    MissingToken,

    /// 403 when the token does not resolve to an account.
    #[display("Invalid Authentication token!")]
    InvalidToken,

    /// 403 when the caller may not make this move.
    #[display("{_0}")]
    Forbidden(String),

    /// 500 with the underlying error text.
    #[display("An error occurred: {_0}")]
    Internal(String),
}

impl ApiError {
    /// 400 with `message`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// 500 wrapping `err`.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            Self::GameOver { board, winner } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": message, "board": board.encode(), "winner": winner }),
            ),
            Self::LoginFailed => (StatusCode::FORBIDDEN, json!({ "status": "failed" })),
            Self::MissingToken | Self::InvalidToken => (
                StatusCode::FORBIDDEN,
                json!({ "message": message, "data": null, "error": "Unauthorized" }),
            ),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, json!({ "message": message })),
            Self::Internal(_) => {
                error!(%message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": message }))
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound { .. } => Self::bad_request("Invalid game ID"),
            EngineError::GameOver { board, winner, .. } => Self::GameOver { board, winner },
            EngineError::IllegalMove { .. } | EngineError::Board(_) => {
                Self::bad_request("Invalid move")
            }
            EngineError::MoveRefused { .. } => Self::Forbidden(err.to_string()),
            EngineError::Store(e) => Self::internal(e),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::UsernameTaken { .. } => Self::bad_request("Username already exists!"),
            AccountError::MissingCredentials => Self::bad_request("Missing required fields!"),
            AccountError::Password(e) => Self::internal(e),
            AccountError::Db(e) => Self::internal(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Db(e) => Self::internal(e),
            AuthError::Key | AuthError::InvalidTtl { .. } => Self::internal(err),
            other => {
                warn!(error = %other, "Unresolvable token");
                Self::InvalidToken
            }
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(err)
    }
}
