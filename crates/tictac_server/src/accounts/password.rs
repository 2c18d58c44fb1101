//! Salted password hashing.
//!
//! Hashes are PBKDF2-HMAC-SHA256 with a single 32-byte block, stored as
//! `sha256$<rounds>$<salt hex>$<digest hex>`.

use derive_more::{Display, Error};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use tracing::instrument;

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;

/// Default number of PBKDF2 rounds for new hashes.
pub const DEFAULT_HASH_ROUNDS: u32 = 100_000;

/// Password hashing failures.
#[derive(Debug, Clone, Display, Error)]
pub enum PasswordError {
    /// A stored hash does not follow the expected format.
    #[display("Malformed password hash")]
    Malformed,
    /// The HMAC key could not be set up.
    #[display("Password key setup failed")]
    Key,
}

/// Hashes `password` with a fresh random salt.
///
/// # Errors
///
/// Returns [`PasswordError::Key`] if the HMAC cannot be keyed.
#[instrument(skip(password))]
pub fn hash_password(password: &str, rounds: u32) -> Result<String, PasswordError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let rounds = rounds.max(1);
    let digest = derive(password.as_bytes(), &salt, rounds)?;
    Ok(format!(
        "{SCHEME}${rounds}${}${}",
        hex::encode(salt),
        hex::encode(digest)
    ))
}

/// Checks `password` against a stored hash.
///
/// # Errors
///
/// Returns [`PasswordError::Malformed`] if `stored` cannot be parsed.
#[instrument(skip_all)]
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(rounds), Some(salt), Some(digest), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(PasswordError::Malformed);
    };

    let rounds: u32 = rounds.parse().map_err(|_| PasswordError::Malformed)?;
    let salt = hex::decode(salt).map_err(|_| PasswordError::Malformed)?;
    let expected = hex::decode(digest).map_err(|_| PasswordError::Malformed)?;

    let actual = derive(password.as_bytes(), &salt, rounds.max(1))?;
    Ok(constant_time_eq(&actual, &expected))
}

fn derive(password: &[u8], salt: &[u8], rounds: u32) -> Result<[u8; 32], PasswordError> {
    let prf = HmacSha256::new_from_slice(password).map_err(|_| PasswordError::Key)?;

    let mut mac = prf.clone();
    mac.update(salt);
    mac.update(&1u32.to_be_bytes());
    let mut block = [0u8; 32];
    block.copy_from_slice(&mac.finalize().into_bytes());
    let mut out = block;

    for _ in 1..rounds {
        let mut mac = prf.clone();
        mac.update(&block);
        block.copy_from_slice(&mac.finalize().into_bytes());
        out.iter_mut().zip(block.iter()).for_each(|(o, b)| *o ^= b);
    }

    Ok(out)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies() {
        let stored = hash_password("hunter2", 10).expect("hash");
        assert!(stored.starts_with("sha256$10$"));
        assert!(verify_password("hunter2", &stored).expect("verify"));
        assert!(!verify_password("hunter3", &stored).expect("verify"));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("same", 2).expect("hash");
        let b = hash_password("same", 2).expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn test_rfc7914_vector() {
        // PBKDF2-HMAC-SHA256("passwd", "salt", 1), first 32 bytes.
        let out = derive(b"passwd", b"salt", 1).expect("derive");
        assert_eq!(
            hex::encode(out),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn test_malformed_rejected() {
        for stored in ["", "md5$1$00$00", "sha256$x$00$00", "sha256$1$zz$00", "sha256$1$00$00$extra"] {
            assert!(
                matches!(verify_password("pw", stored), Err(PasswordError::Malformed)),
                "{stored}"
            );
        }
    }
}
