//! Application state for the terminal UI.

use std::time::Instant;

use strictly_simon::{SignalSource, TurnEvent, TurnOwner};
use tracing::debug;

use super::input::Action;
use crate::{BoardView, CuePlayer, GameDriver, ResultStore};

/// Name prompt text plus the driver it feeds.
pub struct App<S, C, R> {
    driver: GameDriver<S, C, R>,
    name_input: String,
    notice: Option<String>,
    quit: bool,
}

impl<S, C, R> App<S, C, R>
where
    S: SignalSource,
    C: CuePlayer,
    R: ResultStore,
{
    /// Creates the app around a driver.
    pub fn new(driver: GameDriver<S, C, R>) -> Self {
        Self {
            driver,
            name_input: String::new(),
            notice: None,
            quit: false,
        }
    }

    /// Loads the stored leaderboard.
    pub async fn load(&mut self) {
        self.driver.load_leaderboard().await;
    }

    /// Advances playback to `now`.
    pub fn tick(&mut self, now: Instant) {
        self.driver.tick(now);
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> BoardView {
        self.driver.view()
    }

    /// Name typed so far.
    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Returns true while the name prompt is open.
    pub fn is_naming(&self) -> bool {
        self.driver.session().awaiting_name()
    }

    /// Returns true once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Status line text.
    pub fn status(&self) -> String {
        if let Some(notice) = &self.notice {
            return notice.clone();
        }
        let view = self.driver.view();
        if let Some(score) = view.awaiting_name() {
            return format!("Game over! Score {}. Enter your name.", score);
        }
        match view.owner() {
            TurnOwner::Idle => "Press s to start, q to quit".to_string(),
            TurnOwner::Computer => "Watch the sequence...".to_string(),
            TurnOwner::User => format!(
                "Your turn: {}/{}",
                view.progress(),
                view.sequence_len()
            ),
        }
    }

    /// Applies one user action.
    pub async fn handle(&mut self, action: Action, now: Instant) {
        debug!(?action, "Handling action");
        match action {
            Action::Press(signal) => {
                self.notice = match self.driver.press(signal, now) {
                    Some(TurnEvent::RoundComplete { score, .. }) => {
                        Some(format!("Round {} complete!", score))
                    }
                    _ => None,
                };
            }
            Action::Start => {
                if self.driver.start(now) {
                    self.notice = None;
                }
            }
            Action::Reset => {
                self.driver.reset();
                self.name_input.clear();
                self.notice = None;
            }
            Action::Quit => self.quit = true,
            Action::Type(c) => {
                self.name_input.push(c);
                self.notice = None;
            }
            Action::Backspace => {
                self.name_input.pop();
            }
            Action::SubmitName => match self.driver.submit_name(&self.name_input).await {
                Ok(Some(result)) => {
                    self.notice = Some(format!("Saved {} with {}", result.name(), result.score()));
                    self.name_input.clear();
                }
                Ok(None) => {}
                Err(e) => self.notice = Some(e.to_string()),
            },
        }
    }
}
