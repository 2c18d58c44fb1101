//! Token issuance and identity resolution.

mod resolver;
mod token;

pub use resolver::{AuthError, AuthService, IdentityResolver};
pub use token::{Claims, TokenSigner};
