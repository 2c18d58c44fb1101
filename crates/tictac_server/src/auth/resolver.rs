//! Turning a presented token into an account identity.

use derive_more::{Display, Error, From};
use tracing::{debug, instrument, warn};

use crate::AccountId;
use crate::accounts::AccountRepository;
use crate::auth::TokenSigner;
use crate::db::DbError;

/// Authentication failures.
#[derive(Debug, Display, Error, From)]
pub enum AuthError {
    /// The token is not in the expected shape.
    #[display("Malformed token")]
    Malformed,

    /// The signature does not match the payload.
    #[display("Token signature mismatch")]
    BadSignature,

    /// The token is past its expiry.
    #[display("Token expired")]
    Expired,

    /// The token names an account that does not exist.
    #[display("Token names unknown account {user_id}")]
    UnknownAccount {
        /// Account id from the token.
        user_id: i32,
    },

    /// The signing secret is unusable.
    #[display("Token key setup failed")]
    Key,

    /// The token lifetime is not a positive, representable duration.
    #[display("Invalid token lifetime of {minutes} minutes")]
    InvalidTtl {
        /// Configured lifetime.
        minutes: i64,
    },

    /// Database failure while looking up the account.
    #[display("{_0}")]
    #[from]
    Db(DbError),
}

/// Resolves credentials to an [`AccountId`].
pub trait IdentityResolver: Send + Sync + std::fmt::Debug {
    /// Returns the account a token belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the token is invalid or the account is gone.
    fn resolve(&self, token: &str) -> Result<AccountId, AuthError>;
}

/// Token-based resolver backed by the account table.
#[derive(Debug, Clone)]
pub struct AuthService {
    signer: TokenSigner,
    accounts: AccountRepository,
}

impl AuthService {
    /// Creates the service.
    pub fn new(signer: TokenSigner, accounts: AccountRepository) -> Self {
        Self { signer, accounts }
    }

    /// Signer used to issue tokens at login.
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }
}

impl IdentityResolver for AuthService {
    #[instrument(skip_all)]
    fn resolve(&self, token: &str) -> Result<AccountId, AuthError> {
        let claims = self.signer.verify(token).inspect_err(|e| {
            warn!(error = %e, "Token rejected");
        })?;

        let id = AccountId::new(claims.user_id);
        match self.accounts.find(id)? {
            Some(_) => {
                debug!(user_id = %id, "Token resolved");
                Ok(id)
            }
            None => {
                warn!(user_id = %id, "Token for missing account");
                Err(AuthError::UnknownAccount {
                    user_id: claims.user_id,
                })
            }
        }
    }
}
