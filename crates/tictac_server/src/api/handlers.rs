//! Route handlers.
//!
//! Engine and repository calls block on SQLite, so each runs on the blocking pool.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tictac_rules::CELL_COUNT;
use tracing::{debug, info, instrument, warn};

use crate::api::error::MOVE_FIELDS_REQUIRED;
use crate::api::{
    ApiError, AppState, Authenticated, CredentialsRequest, GameCreatedResponse, LoginResponse,
    MessageResponse, MoveRequest, MoveResponse, RegisterResponse, UserView,
};
use crate::game::GameId;

const NOT_JSON: &str = "Request body must be JSON";

/// `GET /ping`
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::new("pong!".to_string()))
}

/// `POST /auth/register`
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let Json(request) = body.map_err(|e| {
        debug!(error = %e, "Register body rejected");
        ApiError::bad_request(NOT_JSON)
    })?;
    let (username, password) = request
        .complete()
        .map(|(u, p)| (u.to_string(), p.to_string()))
        .ok_or_else(|| ApiError::bad_request("Missing required fields!"))?;

    let accounts = state.accounts.clone();
    let account =
        tokio::task::spawn_blocking(move || accounts.register(&username, &password)).await??;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse::new(
            "User registered successfully!".to_string(),
            UserView::from(&account),
        )),
    ))
}

/// `POST /auth/login`
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = body.map_err(|_| ApiError::bad_request(NOT_JSON))?;
    let (username, password) = request
        .complete()
        .map(|(u, p)| (u.to_string(), p.to_string()))
        .ok_or_else(|| ApiError::bad_request("Username and password are required"))?;

    let accounts = state.accounts.clone();
    let account =
        tokio::task::spawn_blocking(move || accounts.authenticate(&username, &password))
            .await??
            .ok_or_else(|| {
                warn!("Login rejected");
                ApiError::LoginFailed
            })?;

    let token = state.signer.issue(account.account_id())?;
    info!(user_id = account.id(), "Login succeeded");
    Ok(Json(LoginResponse::new(
        "success",
        token,
        UserView::from(&account),
    )))
}

/// `POST /game`
#[instrument(skip_all, fields(user_id = %caller))]
pub async fn create_game(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
) -> Result<Json<GameCreatedResponse>, ApiError> {
    let engine = state.engine.clone();
    let record = tokio::task::spawn_blocking(move || engine.create_game(caller)).await??;
    Ok(Json(GameCreatedResponse::new(*record.id())))
}

/// `POST /game/move`
#[instrument(skip_all, fields(user_id = %caller))]
pub async fn make_move(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<MoveResponse>, ApiError> {
    let request = body
        .map(|Json(request)| request)
        .map_err(|_| ApiError::bad_request(MOVE_FIELDS_REQUIRED))?;

    let (game_id, cell) = match (request.game_id, request.cell) {
        (Some(game_id), Some(cell)) if game_id != 0 => (game_id, cell),
        _ => return Err(ApiError::bad_request(MOVE_FIELDS_REQUIRED)),
    };

    let game_id = GameId::try_from(game_id).map_err(|_| ApiError::bad_request("Invalid game ID"))?;
    // Negative cells fall through to the engine's index check.
    let cell = usize::try_from(cell).unwrap_or(CELL_COUNT);

    let engine = state.engine.clone();
    let record =
        tokio::task::spawn_blocking(move || engine.apply_move(game_id, cell, caller)).await??;
    Ok(Json(MoveResponse::from(record)))
}
