//! Terminal UI for Strictly Simon.

mod app;
mod input;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use strictly_simon::{RandomSignals, SessionController, SignalSource};
use tracing::{error, info, instrument};

pub use app::App;
pub use input::{Action, map_key};

use crate::{CuePlayer, GameDriver, ResultStore, SimonConfig, SqliteResultStore};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Run the TUI game.
pub async fn run_tui(config: SimonConfig, seed: Option<u64>) -> Result<()> {
    // Log to a file so the terminal stays clean
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file '{}'", config.log_file()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(crate::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(
        db_path = %config.db_path(),
        audio = %config.audio(),
        ?seed,
        "Starting Strictly Simon TUI"
    );

    let store = SqliteResultStore::open(config.db_path().clone())
        .context("Failed to open leaderboard database")?;
    let source = match seed {
        Some(seed) => RandomSignals::seeded(seed),
        None => RandomSignals::from_entropy(),
    };
    let driver = GameDriver::new(
        SessionController::new(source),
        config.audio().player(),
        store,
        *config.pacing(),
    );
    let mut app = App::new(driver);
    app.load().await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("TUI exited");
    res
}

/// Draw, advance playback, handle one key; repeat until quit.
#[instrument(skip_all)]
async fn run_game_loop<S, C, R>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S, C, R>,
) -> Result<()>
where
    S: SignalSource,
    C: CuePlayer,
    R: ResultStore,
{
    while !app.should_quit() {
        app.tick(Instant::now());

        let view = app.view();
        let status = app.status();
        terminal.draw(|frame| ui::draw(frame, &view, &status, app.name_input()))?;

        if !event::poll(FRAME_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = map_key(key.code, app.is_naming()) {
                app.handle(action, Instant::now()).await;
            }
        }
    }
    info!("User quit");
    Ok(())
}
