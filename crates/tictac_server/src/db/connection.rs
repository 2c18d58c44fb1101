//! SQLite connection handling and embedded migrations.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::DbError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Writers wait this long for the SQLite write lock before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Handle to a SQLite database file.
///
/// Each operation opens its own connection, so the handle is cheap to clone
/// and share between threads.
#[derive(Debug, Clone)]
pub struct Database {
    path: String,
}

impl Database {
    /// Opens the database at `path`, creating it if needed, and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the file cannot be opened or a migration fails.
    #[instrument(skip(path), fields(path = %path.as_ref()))]
    pub fn open(path: impl AsRef<str>) -> Result<Self, DbError> {
        let db = Self {
            path: path.as_ref().to_string(),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Returns the database path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Applies any pending migrations and returns how many ran.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self), fields(path = %self.path))]
    pub fn migrate(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let applied = conn.run_pending_migrations(MIGRATIONS)?;
        info!(count = applied.len(), "Migrations applied");
        Ok(applied.len())
    }

    /// Establishes a connection with the busy timeout configured.
    #[instrument(skip(self))]
    pub(crate) fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.path, e)))?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))?;
        Ok(conn)
    }
}
