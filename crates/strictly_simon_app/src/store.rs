//! Result store collaborators: where finished games end up.

use std::sync::Arc;

use derive_more::{Display, Error};
use strictly_simon::{Leaderboard, RoundResult};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::db::{DbError, ResultRepository};

/// Result store failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Result store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<DbError> for StoreError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    #[track_caller]
    fn from(err: tokio::task::JoinError) -> Self {
        Self::new(format!("Storage task failed: {}", err))
    }
}

/// Durable, bounded leaderboard.
///
/// Appends are atomic append-and-trim operations; reads return at most
/// ten results sorted by descending score, ties in insertion order.
#[async_trait::async_trait]
pub trait ResultStore: Send + Sync {
    /// Appends one result.
    async fn append(&self, result: &RoundResult) -> Result<(), StoreError>;

    /// Reads the leaderboard, best first.
    async fn read_top(&self) -> Result<Vec<RoundResult>, StoreError>;
}

/// SQLite-backed store. Blocking database work runs off the async runtime.
#[derive(Debug, Clone)]
pub struct SqliteResultStore {
    repository: ResultRepository,
}

impl SqliteResultStore {
    /// Creates a store over an opened repository.
    pub fn new(repository: ResultRepository) -> Self {
        Self { repository }
    }

    /// Opens (and migrates) the database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        Ok(Self::new(ResultRepository::new(db_path)?))
    }
}

#[async_trait::async_trait]
impl ResultStore for SqliteResultStore {
    #[instrument(skip(self, result), fields(name = %result.name(), score = result.score()))]
    async fn append(&self, result: &RoundResult) -> Result<(), StoreError> {
        let repository = self.repository.clone();
        let result = result.clone();
        let retained = tokio::task::spawn_blocking(move || repository.append(&result)).await??;
        debug!(retained = retained.is_some(), "Stored result");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn read_top(&self) -> Result<Vec<RoundResult>, StoreError> {
        let repository = self.repository.clone();
        let results = tokio::task::spawn_blocking(move || repository.top_results()).await??;
        Ok(results)
    }
}

/// In-memory store, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryResultStore {
    board: Arc<Mutex<Leaderboard>>,
}

impl MemoryResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ResultStore for MemoryResultStore {
    async fn append(&self, result: &RoundResult) -> Result<(), StoreError> {
        self.board.lock().await.record(result.clone());
        Ok(())
    }

    async fn read_top(&self) -> Result<Vec<RoundResult>, StoreError> {
        Ok(self.board.lock().await.entries().to_vec())
    }
}
