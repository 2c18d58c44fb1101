//! JSON-over-HTTP surface.

mod error;
mod extract;
mod handlers;
mod types;

pub use error::{ApiError, MOVE_FIELDS_REQUIRED};
pub use extract::Authenticated;
pub use types::{
    CredentialsRequest, GameCreatedResponse, LoginResponse, MessageResponse, MoveRequest,
    MoveResponse, RegisterResponse, UserView,
};

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::accounts::AccountRepository;
use crate::auth::{IdentityResolver, TokenSigner};
use crate::game::GameEngine;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Game engine.
    pub engine: GameEngine,
    /// Account storage for register and login.
    pub accounts: AccountRepository,
    /// Resolves bearer tokens on protected routes.
    pub resolver: Arc<dyn IdentityResolver>,
    /// Issues tokens at login.
    pub signer: TokenSigner,
}

/// Builds the application router.
#[instrument(skip_all)]
pub fn router(state: AppState) -> Router {
    info!("Building router");
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/game", post(handlers::create_game))
        .route("/game/move", post(handlers::make_move))
        .layer(
            tower::ServiceBuilder::new().map_request(|req: Request<Body>| {
                info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
                req
            }),
        )
        .with_state(state)
}
