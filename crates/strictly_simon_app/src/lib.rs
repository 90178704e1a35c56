//! Strictly Simon app - terminal front end and persistent leaderboard for
//! the `strictly_simon` game logic.
//!
//! # Architecture
//!
//! - **Driver**: [`GameDriver`] runs a session against explicit `Instant`s,
//!   applying playback steps and cues as they fall due
//! - **Store**: [`ResultStore`] persists finished games; [`SqliteResultStore`]
//!   keeps the top ten in SQLite through diesel
//! - **Audio**: [`CuePlayer`] implementations for the terminal bell or silence
//! - **TUI**: ratatui board, leaderboard panel and name prompt
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use strictly_simon::{Pacing, ScriptedSignals, SessionController, Signal, TurnOwner};
//! use strictly_simon_app::{GameDriver, MemoryResultStore, SilentCues};
//!
//! let session = SessionController::new(ScriptedSignals::new([Signal::Blue]));
//! let store = MemoryResultStore::new();
//! let mut driver = GameDriver::new(session, SilentCues, store, Pacing::default());
//!
//! let start = Instant::now();
//! driver.start(start);
//! driver.tick(start);
//! assert_eq!(*driver.view().active_signal(), Some(Signal::Blue));
//!
//! let released = start + driver.pacing().pulse();
//! driver.tick(released);
//! assert_eq!(*driver.view().active_signal(), None);
//!
//! driver.tick(released + driver.pacing().settle());
//! assert_eq!(*driver.view().owner(), TurnOwner::User);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod audio;
mod cli;
mod config;
mod driver;
mod store;

/// Database layer for the persistent leaderboard.
pub mod db;
/// Terminal UI.
pub mod tui;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,strictly_simon=debug,strictly_simon_app=debug";

// Crate-level exports - Audio
pub use audio::{AudioMode, CuePlayer, SilentCues, TerminalBell};

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, DB_PATH_ENV, SimonConfig};

// Crate-level exports - Driver
pub use driver::{BoardView, GameDriver};

// Crate-level exports - Result store
pub use store::{MemoryResultStore, ResultStore, SqliteResultStore, StoreError};
