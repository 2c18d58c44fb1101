//! Authenticated-caller extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::{debug, instrument};

use crate::AccountId;
use crate::api::{ApiError, AppState};

/// The account behind the request's `Authorization` header.
///
/// The header holds the token itself, optionally prefixed with `Bearer `.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub AccountId);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    #[instrument(skip_all, fields(uri = %parts.uri))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim())
            .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or(ApiError::MissingToken)?;

        let resolver = state.resolver.clone();
        let account = tokio::task::spawn_blocking(move || resolver.resolve(&token)).await??;
        debug!(user_id = %account, "Caller authenticated");
        Ok(Self(account))
    }
}
