//! Command-line interface for strictly_simon.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Strictly Simon - terminal memory game with a persistent leaderboard
#[derive(Parser, Debug)]
#[command(name = "strictly_simon")]
#[command(about = "Repeat the growing color sequence", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to the TOML config file
        #[arg(short, long, default_value = "strictly_simon.toml")]
        config: PathBuf,

        /// Leaderboard database file (overrides config and STRICTLY_SIMON_DB)
        #[arg(long)]
        db_path: Option<String>,

        /// Seed for a reproducible signal sequence
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the leaderboard
    Scores {
        /// Path to the TOML config file
        #[arg(short, long, default_value = "strictly_simon.toml")]
        config: PathBuf,

        /// Leaderboard database file (overrides config and STRICTLY_SIMON_DB)
        #[arg(long)]
        db_path: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
