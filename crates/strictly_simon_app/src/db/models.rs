//! Database models for stored round results.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use strictly_simon::RoundResult;
use tracing::instrument;

use crate::db::{DbError, schema};

/// One leaderboard row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::round_results)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StoredResult {
    id: i32,
    player_name: String,
    score: i32,
    recorded_at: NaiveDateTime,
}

impl StoredResult {
    /// Converts the row back into a domain result.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored row no longer satisfies the result
    /// rules (negative score or blank name).
    #[instrument(skip(self), fields(id = self.id))]
    pub fn to_round_result(&self) -> Result<RoundResult, DbError> {
        let score = u32::try_from(self.score)?;
        RoundResult::new(&self.player_name, score)
            .map_err(|e| DbError::new(format!("Invalid stored result {}: {}", self.id, e)))
    }
}

/// Insertable row for a freshly submitted result.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::round_results)]
pub struct NewStoredResult {
    player_name: String,
    score: i32,
}

impl TryFrom<&RoundResult> for NewStoredResult {
    type Error = DbError;

    #[track_caller]
    fn try_from(result: &RoundResult) -> Result<Self, Self::Error> {
        Ok(Self::new(result.name().clone(), i32::try_from(*result.score())?))
    }
}
