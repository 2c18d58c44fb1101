//! Database persistence layer for games and accounts.

mod connection;
mod error;
pub(crate) mod models;
pub(crate) mod schema; // Diesel generated schema - internal use only

pub use connection::Database;
pub use error::DbError;
