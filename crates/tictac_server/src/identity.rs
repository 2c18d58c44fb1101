//! Authenticated caller identity.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Opaque identity of an authenticated account.
///
/// The game engine only compares and stores these; it never inspects how
/// they were obtained.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(i32);

impl AccountId {
    /// Wraps a raw account id.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw account id.
    pub const fn get(self) -> i32 {
        self.0
    }
}
