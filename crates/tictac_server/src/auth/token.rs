//! Signed, expiring bearer tokens.
//!
//! A token is `base64url(claims JSON).base64url(HMAC-SHA256(claims JSON))`.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, instrument};

use crate::AccountId;
use crate::auth::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Payload carried by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account the token was issued to.
    pub user_id: i32,
    /// Expiry as a Unix timestamp in seconds.
    pub exp: i64,
}

/// Issues and verifies tokens with a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    key: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("key", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer; tokens live for `ttl_minutes`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidTtl`] unless `ttl_minutes` is positive and
    /// representable as a duration.
    pub fn new(secret: impl AsRef<[u8]>, ttl_minutes: i64) -> Result<Self, AuthError> {
        let ttl = Duration::try_minutes(ttl_minutes)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or(AuthError::InvalidTtl {
                minutes: ttl_minutes,
            })?;
        Ok(Self {
            key: secret.as_ref().to_vec(),
            ttl,
        })
    }

    /// Issues a token for `account` expiring one TTL from now.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Key`] if the secret cannot key the MAC.
    pub fn issue(&self, account: AccountId) -> Result<String, AuthError> {
        self.issue_at(account, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Key`] if the secret cannot key the MAC, or
    /// [`AuthError::InvalidTtl`] if the expiry falls outside the calendar.
    #[instrument(skip(self))]
    pub fn issue_at(&self, account: AccountId, now: DateTime<Utc>) -> Result<String, AuthError> {
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or(AuthError::InvalidTtl {
                minutes: self.ttl.num_minutes(),
            })?;
        let claims = Claims {
            user_id: account.get(),
            exp: exp.timestamp(),
        };
        let payload = serde_json::to_vec(&claims).map_err(|_| AuthError::Malformed)?;
        let signature = self.mac(&payload)?.finalize().into_bytes();

        debug!(exp = claims.exp, "Token issued");
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verifies a token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Malformed`], [`AuthError::BadSignature`] or [`AuthError::Expired`].
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Malformed`], [`AuthError::BadSignature`] or [`AuthError::Expired`].
    #[instrument(skip_all)]
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let (payload, signature) = token.split_once('.').ok_or(AuthError::Malformed)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AuthError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::Malformed)?;

        self.mac(&payload)?
            .verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        let claims: Claims = serde_json::from_slice(&payload).map_err(|_| AuthError::Malformed)?;
        if claims.exp <= now.timestamp() {
            debug!(exp = claims.exp, "Token expired");
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }

    fn mac(&self, payload: &[u8]) -> Result<HmacSha256, AuthError> {
        let mut mac = HmacSha256::new_from_slice(&self.key).map_err(|_| AuthError::Key)?;
        mac.update(payload);
        Ok(mac)
    }
}
