//! Database persistence layer for the leaderboard.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{NewStoredResult, StoredResult};
pub use repository::ResultRepository;
