//! Database row models.

use chrono::NaiveDateTime;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// Stored game row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct GameRow {
    pub(crate) id: i32,
    pub(crate) owner_id: i32,
    pub(crate) board: String,
    pub(crate) ply: i32,
    pub(crate) winner: Option<String>,
    #[allow(dead_code)]
    pub(crate) created_at: NaiveDateTime,
    #[allow(dead_code)]
    pub(crate) updated_at: NaiveDateTime,
}

/// Insertable game row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub(crate) struct NewGameRow {
    owner_id: i32,
    board: String,
    ply: i32,
    winner: Option<String>,
}

/// Changes written by a conditional game update.
#[derive(Debug, Clone, AsChangeset, new)]
#[diesel(table_name = schema::games)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct GameChanges {
    board: String,
    ply: i32,
    winner: Option<String>,
    updated_at: NaiveDateTime,
}

/// Insertable account row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::users)]
pub(crate) struct NewUserRow {
    username: String,
    password_hash: String,
}
