//! Database repository for the persistent leaderboard.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use strictly_simon::{LEADERBOARD_CAPACITY, RoundResult};
use tracing::{debug, info, instrument};

use crate::db::{DbError, NewStoredResult, StoredResult, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for leaderboard operations.
///
/// Every append runs as one transaction: insert, then trim everything
/// below the top [`LEADERBOARD_CAPACITY`] rows (`score DESC, id ASC`).
#[derive(Debug, Clone)]
pub struct ResultRepository {
    db_path: String,
}

impl ResultRepository {
    /// Opens the database at the given path and applies pending migrations.
    ///
    /// The file is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Opening ResultRepository");
        let repository = Self { db_path };
        let mut conn = repository.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        debug!(applied = applied.len(), "Migrations applied");
        Ok(repository)
    }

    /// Path of the underlying database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Appends a result and trims the table to the leaderboard capacity.
    ///
    /// Returns the stored row if it made the leaderboard, `None` if it was
    /// trimmed away immediately.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs; the transaction is
    /// rolled back in that case.
    #[instrument(skip(self, result), fields(name = %result.name(), score = result.score()))]
    pub fn append(&self, result: &RoundResult) -> Result<Option<StoredResult>, DbError> {
        debug!("Appending result");
        let row = NewStoredResult::try_from(result)?;
        let mut conn = self.connection()?;

        let retained = conn.transaction::<_, DbError, _>(|conn| {
            let stored = diesel::insert_into(schema::round_results::table)
                .values(&row)
                .returning(StoredResult::as_returning())
                .get_result(conn)?;

            let ranked: Vec<i32> = schema::round_results::table
                .select(schema::round_results::id)
                .order((
                    schema::round_results::score.desc(),
                    schema::round_results::id.asc(),
                ))
                .load(conn)?;
            let stale: Vec<i32> = ranked.into_iter().skip(LEADERBOARD_CAPACITY).collect();
            let kept = !stale.contains(stored.id());

            if !stale.is_empty() {
                let removed = diesel::delete(
                    schema::round_results::table.filter(schema::round_results::id.eq_any(stale)),
                )
                .execute(conn)?;
                debug!(removed, "Trimmed leaderboard");
            }

            Ok(kept.then_some(stored))
        })?;

        info!(retained = retained.is_some(), "Result appended");
        Ok(retained)
    }

    /// Returns the leaderboard rows, best first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn top(&self) -> Result<Vec<StoredResult>, DbError> {
        debug!("Loading leaderboard");
        let mut conn = self.connection()?;

        let rows = schema::round_results::table
            .select(StoredResult::as_select())
            .order((
                schema::round_results::score.desc(),
                schema::round_results::id.asc(),
            ))
            .limit(LEADERBOARD_CAPACITY as i64)
            .load(&mut conn)?;

        info!(count = rows.len(), "Leaderboard loaded");
        Ok(rows)
    }

    /// Returns the leaderboard as domain results, best first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or a row is invalid.
    #[instrument(skip(self))]
    pub fn top_results(&self) -> Result<Vec<RoundResult>, DbError> {
        self.top()?
            .iter()
            .map(StoredResult::to_round_result)
            .collect()
    }
}
