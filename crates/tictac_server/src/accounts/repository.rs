//! Account storage.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::AccountId;
use crate::accounts::{DEFAULT_HASH_ROUNDS, PasswordError, hash_password, verify_password};
use crate::db::models::NewUserRow;
use crate::db::{Database, DbError, schema};

/// A registered account.
#[derive(Debug, Clone, Queryable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Account {
    id: i32,
    username: String,
    #[getter(skip)]
    #[serde(skip)]
    password_hash: String,
    wins: i32,
    #[serde(skip)]
    created_at: NaiveDateTime,
}

impl Account {
    /// Identity this account plays under.
    pub fn account_id(&self) -> AccountId {
        AccountId::new(self.id)
    }
}

/// Account operation failures.
#[derive(Debug, Display, Error, From)]
pub enum AccountError {
    /// Another account already uses this username.
    #[display("Username '{username}' is already taken")]
    UsernameTaken {
        /// Requested username.
        username: String,
    },

    /// Username or password was empty.
    #[display("Username and password are required")]
    MissingCredentials,

    /// Hashing failed or a stored hash is unreadable.
    #[display("{_0}")]
    #[from]
    Password(PasswordError),

    /// Database failure.
    #[display("{_0}")]
    #[from]
    Db(DbError),
}

/// Repository for the `users` table.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: Database,
    hash_rounds: u32,
}

impl AccountRepository {
    /// Creates a repository using [`DEFAULT_HASH_ROUNDS`].
    #[instrument(skip(db), fields(path = %db.path()))]
    pub fn new(db: Database) -> Self {
        info!("Creating AccountRepository");
        Self {
            db,
            hash_rounds: DEFAULT_HASH_ROUNDS,
        }
    }

    /// Sets the hashing cost for passwords stored from now on.
    pub fn with_hash_rounds(mut self, rounds: u32) -> Self {
        self.hash_rounds = rounds.max(1);
        self
    }

    /// Registers a new account with zero wins.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::MissingCredentials`] for an empty username or password,
    /// [`AccountError::UsernameTaken`] if the name exists, or a database error.
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        if username.is_empty() || password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }

        let row = NewUserRow::new(username.to_string(), hash_password(password, self.hash_rounds)?);
        let mut conn = self.db.connection()?;

        let inserted = diesel::insert_into(schema::users::table)
            .values(&row)
            .returning(Account::as_returning())
            .get_result(&mut conn);

        match inserted {
            Ok(account) => {
                info!(user_id = account.id(), username = %account.username(), "Account registered");
                Ok(account)
            }
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                warn!("Username already taken");
                Err(AccountError::UsernameTaken {
                    username: username.to_string(),
                })
            }
            Err(e) => Err(DbError::from(e).into()),
        }
    }

    /// Returns the account if `password` matches, `None` otherwise.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure or an unreadable stored hash.
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<Account>, AccountError> {
        let mut conn = self.db.connection()?;

        let account = schema::users::table
            .filter(schema::users::username.eq(username))
            .select(Account::as_select())
            .first(&mut conn)
            .optional()
            .map_err(DbError::from)?;

        let Some(account) = account else {
            debug!("No such username");
            return Ok(None);
        };

        if verify_password(password, &account.password_hash)? {
            debug!(user_id = account.id(), "Credentials accepted");
            Ok(Some(account))
        } else {
            debug!(user_id = account.id(), "Password mismatch");
            Ok(None)
        }
    }

    /// Looks up an account by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] on database failure.
    #[instrument(skip(self))]
    pub fn find(&self, id: AccountId) -> Result<Option<Account>, DbError> {
        let mut conn = self.db.connection()?;

        let account = schema::users::table
            .find(id.get())
            .select(Account::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(account)
    }

    /// Adds one to an account's win tally; returns false if the account does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] on database failure.
    #[instrument(skip(self))]
    pub fn increment_wins(&self, id: AccountId) -> Result<bool, DbError> {
        let mut conn = self.db.connection()?;

        let updated = diesel::update(schema::users::table.find(id.get()))
            .set(schema::users::wins.eq(schema::users::wins + 1))
            .execute(&mut conn)?;

        if updated == 1 {
            info!(user_id = %id, "Win recorded");
            Ok(true)
        } else {
            warn!(user_id = %id, "Win credited to unknown account");
            Ok(false)
        }
    }
}
