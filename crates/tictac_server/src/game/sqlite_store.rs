//! SQLite-backed game store.

use diesel::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::db::models::{GameChanges, GameRow, NewGameRow};
use crate::db::{Database, DbError, schema};
use crate::game::{GameId, GameRecord, GameStore, NewGame, SwapOutcome};

/// Game store persisting to the `games` table.
///
/// Ids come from `AUTOINCREMENT`, so they are never reused and always increase.
/// The conditional update is a single `UPDATE ... WHERE id = ? AND ply = ?`.
#[derive(Debug, Clone)]
pub struct SqliteGameStore {
    db: Database,
}

impl SqliteGameStore {
    /// Creates a store over an opened database.
    #[instrument(skip(db), fields(path = %db.path()))]
    pub fn new(db: Database) -> Self {
        info!("Creating SqliteGameStore");
        Self { db }
    }
}

impl GameStore for SqliteGameStore {
    #[instrument(skip(self, game), fields(owner_id = %game.owner_id()))]
    fn create(&self, game: NewGame) -> Result<GameRecord, DbError> {
        debug!("Inserting game");
        let mut conn = self.db.connection()?;

        let row = NewGameRow::new(
            game.owner_id().get(),
            game.board().encode(),
            *game.ply(),
            game.winner().map(String::from),
        );

        let inserted = diesel::insert_into(schema::games::table)
            .values(&row)
            .returning(GameRow::as_returning())
            .get_result(&mut conn)?;

        let record = GameRecord::try_from(inserted)?;
        info!(game_id = record.id(), "Game created");
        Ok(record)
    }

    #[instrument(skip(self))]
    fn fetch(&self, id: GameId) -> Result<Option<GameRecord>, DbError> {
        debug!(game_id = id, "Loading game");
        let mut conn = self.db.connection()?;

        let row = schema::games::table
            .find(id)
            .select(GameRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(GameRecord::try_from).transpose()
    }

    #[instrument(skip(self, next), fields(game_id = next.id(), ply = next.ply()))]
    fn compare_and_swap(&self, next: &GameRecord, expected_ply: i32) -> Result<SwapOutcome, DbError> {
        let mut conn = self.db.connection()?;

        let changes = GameChanges::new(
            next.board().encode(),
            *next.ply(),
            next.winner().map(String::from),
            chrono::Utc::now().naive_utc(),
        );

        let updated = diesel::update(
            schema::games::table
                .filter(schema::games::id.eq(*next.id()))
                .filter(schema::games::ply.eq(expected_ply)),
        )
        .set(&changes)
        .execute(&mut conn)?;

        if updated == 1 {
            debug!("Game updated");
            Ok(SwapOutcome::Committed)
        } else {
            warn!(expected_ply, "Stored ply moved on, update skipped");
            Ok(SwapOutcome::Conflict)
        }
    }
}
