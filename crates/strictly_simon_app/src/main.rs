//! Strictly Simon - terminal memory game.

#![warn(missing_docs)]

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use strictly_simon_app::{
    Cli, Command, DEFAULT_LOG_FILTER, ResultStore, SimonConfig, SqliteResultStore, tui,
};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            db_path,
            seed,
        } => {
            let config = load_config(&config, db_path)?;
            tui::run_tui(config, seed).await
        }
        Command::Scores {
            config,
            db_path,
            json,
        } => {
            initialize_stderr_tracing();
            let config = load_config(&config, db_path)?;
            print_scores(&config, json).await
        }
    }
}

#[instrument(skip(config_path), fields(config_path = %config_path.display()))]
fn load_config(config_path: &Path, db_path_override: Option<String>) -> Result<SimonConfig> {
    let config = SimonConfig::load(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    Ok(config.with_db_path_override(db_path_override))
}

/// Print the stored leaderboard.
#[instrument(skip(config), fields(db_path = %config.db_path()))]
async fn print_scores(config: &SimonConfig, json: bool) -> Result<()> {
    let store = SqliteResultStore::open(config.db_path().clone())
        .context("Failed to open leaderboard database")?;
    let results = store
        .read_top()
        .await
        .context("Failed to read leaderboard")?;
    info!(count = results.len(), "Leaderboard read");

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No scores yet.");
    } else {
        for (rank, result) in results.iter().enumerate() {
            println!("{:>2}. {:<20} {:>4}", rank + 1, result.name(), result.score());
        }
    }
    Ok(())
}

fn initialize_stderr_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
