//! Drives a session against wall-clock time.
//!
//! The driver owns the session controller and applies playback steps as
//! their deadlines pass. Callers pass `Instant`s explicitly, so tests can
//! advance time without sleeping.

use std::time::Instant;

use derive_getters::Getters;
use strictly_simon::{
    Cue, Pacing, Playback, RoundResult, SessionController, Signal, SignalSource, TurnEvent,
    TurnOwner, ValidationError,
};
use tracing::{debug, info, instrument, warn};

use crate::{CuePlayer, ResultStore};

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BoardView {
    /// Whose turn it is.
    owner: TurnOwner,
    /// Signal currently lit, if any.
    active_signal: Option<Signal>,
    /// Rounds survived in the current game.
    score: u32,
    /// Score waiting for a player name, if a game just ended.
    awaiting_name: Option<u32>,
    /// Whether a game is running.
    game_active: bool,
    /// Signals reproduced so far in this pass.
    progress: usize,
    /// Length of the live sequence.
    sequence_len: usize,
    /// Leaderboard, best first.
    leaderboard: Vec<RoundResult>,
}

/// Runs one session, its playback schedule, cues and result store.
#[derive(Debug)]
pub struct GameDriver<S, C, R> {
    session: SessionController<S>,
    cues: C,
    store: R,
    pacing: Pacing,
    playback: Option<Playback>,
    next_step_at: Option<Instant>,
    lit: Option<Signal>,
    flash_until: Option<Instant>,
}

impl<S, C, R> GameDriver<S, C, R>
where
    S: SignalSource,
    C: CuePlayer,
    R: ResultStore,
{
    /// Creates a driver around an idle session.
    #[instrument(skip_all)]
    pub fn new(session: SessionController<S>, cues: C, store: R, pacing: Pacing) -> Self {
        Self {
            session,
            cues,
            store,
            pacing,
            playback: None,
            next_step_at: None,
            lit: None,
            flash_until: None,
        }
    }

    /// The underlying session.
    pub fn session(&self) -> &SessionController<S> {
        &self.session
    }

    /// Timing in effect.
    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// Returns true while a playback is scheduled or running.
    pub fn is_playing_back(&self) -> bool {
        self.playback.is_some()
    }

    /// Reads the stored leaderboard into the session cache.
    ///
    /// Storage failures are logged; the cache keeps its previous contents.
    #[instrument(skip(self))]
    pub async fn load_leaderboard(&mut self) {
        match self.store.read_top().await {
            Ok(entries) => self.session.hydrate_leaderboard(entries),
            Err(e) => warn!(error = %e, "Failed to load leaderboard"),
        }
    }

    /// Starts a game; the first playback begins at `now`.
    ///
    /// Returns false when the session refused to start.
    #[instrument(skip(self, now))]
    pub fn start(&mut self, now: Instant) -> bool {
        match self.session.start_game() {
            Some(playback) => {
                self.schedule(playback, now);
                true
            }
            None => false,
        }
    }

    /// Applies the next playback step if it is due at `now` and expires the
    /// press flash.
    ///
    /// At most one step is applied per call. The following step falls due a
    /// full step delay after `now`, so a late tick never skips a pulse.
    #[instrument(level = "trace", skip(self, now))]
    pub fn tick(&mut self, now: Instant) {
        if self.flash_until.is_some_and(|until| now >= until) {
            self.flash_until = None;
            self.lit = None;
        }

        if self.next_step_at.is_none_or(|due| now < due) {
            return;
        }
        let Some(playback) = self.playback.as_mut() else {
            self.next_step_at = None;
            return;
        };
        if !self.session.is_current(playback) {
            debug!(ticket = playback.ticket(), "Dropping stale playback");
            self.clear_schedule();
            return;
        }

        match playback.next() {
            Some(step) => {
                debug!(?step, "Playback step");
                self.flash_until = None;
                self.lit = step.active_signal();
                if let Some(cue) = step.cue() {
                    self.cues.play(cue);
                }
                self.next_step_at = Some(now + step.delay(&self.pacing));
            }
            None => {
                let finished = self.playback.take();
                self.clear_schedule();
                if let Some(finished) = finished {
                    self.session.finish_playback(&finished);
                }
            }
        }
    }

    /// Forwards a pad press to the session and reacts to the outcome.
    ///
    /// Returns `None` when the press was ignored.
    #[instrument(level = "trace", skip(self, now))]
    pub fn press(&mut self, signal: Signal, now: Instant) -> Option<TurnEvent> {
        let event = self.session.submit_signal(signal)?;
        match &event {
            TurnEvent::Correct { .. } => {
                self.cues.play(Cue::Signal(signal));
                self.flash(signal, now);
            }
            TurnEvent::RoundComplete { playback, .. } => {
                self.cues.play(Cue::Signal(signal));
                self.flash(signal, now);
                self.schedule(playback.clone(), now + self.pacing.feedback());
            }
            TurnEvent::Mismatch { score } => {
                self.cues.play(Cue::Wrong);
                self.lit = None;
                self.flash_until = None;
                info!(score, "Wrong signal");
            }
        }
        Some(event)
    }

    /// Abandons the current game and any playback in flight.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.session.reset_game();
        self.clear_schedule();
        self.flash_until = None;
    }

    /// Records the pending score under `name` and forwards it to the store.
    ///
    /// Returns `Ok(None)` when no score is waiting. A failing store is
    /// logged and does not undo the in-session record.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank name; the score stays pending.
    #[instrument(skip(self, name))]
    pub async fn submit_name(
        &mut self,
        name: &str,
    ) -> Result<Option<RoundResult>, ValidationError> {
        let Some(score) = *self.session.pending_score() else {
            debug!("No result awaiting a name");
            return Ok(None);
        };
        let result = self.session.submit_result(name, score)?;
        match self.store.append(&result).await {
            Ok(()) => info!(name = %result.name(), score, "Result saved"),
            Err(e) => warn!(error = %e, "Failed to save result"),
        }
        Ok(Some(result))
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> BoardView {
        let engine = self.session.engine();
        BoardView {
            owner: engine.owner(),
            active_signal: self.lit,
            score: *self.session.score(),
            awaiting_name: *self.session.pending_score(),
            game_active: self.session.is_active(),
            progress: engine.progress(),
            sequence_len: engine.sequence().len(),
            leaderboard: self.session.leaderboard().entries().to_vec(),
        }
    }

    fn schedule(&mut self, playback: Playback, at: Instant) {
        debug!(ticket = playback.ticket(), steps = playback.len(), "Scheduling playback");
        self.playback = Some(playback);
        self.next_step_at = Some(at);
    }

    fn flash(&mut self, signal: Signal, now: Instant) {
        self.lit = Some(signal);
        self.flash_until = Some(now + self.pacing.flash());
    }

    fn clear_schedule(&mut self) {
        self.playback = None;
        self.next_step_at = None;
        self.lit = None;
    }
}
