//! Game session controller: lifecycle across rounds, score bookkeeping and
//! result submission.
//!
//! The controller owns every piece of mutable game state. Callers create
//! one per session; nothing here is global.

use derive_getters::Getters;
use tracing::{debug, info, instrument};

use crate::{
    Leaderboard, MatchResult, Playback, RoundResult, SequenceGenerator, Signal, SignalSource,
    TurnEngine, TurnOwner, ValidationError,
};

/// What happened in response to a user press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    /// The press matched; the user keeps the turn.
    Correct {
        /// Signals reproduced so far in this pass.
        progress: usize,
    },
    /// The user reproduced the whole sequence.
    RoundComplete {
        /// Rounds survived.
        score: u32,
        /// Playback of the next, one-signal-longer sequence.
        playback: Playback,
    },
    /// The press did not match; the game is over.
    Mismatch {
        /// Score held for name entry.
        score: u32,
    },
}

/// Drives one game session at a time.
#[derive(Debug, Getters)]
pub struct SessionController<S> {
    /// Turn engine holding the sequence, progress and turn owner.
    engine: TurnEngine,
    #[getter(skip)]
    generator: SequenceGenerator<S>,
    /// Rounds survived in the current game.
    score: u32,
    #[getter(skip)]
    active: bool,
    /// Score of a finished game awaiting a player name.
    pending_score: Option<u32>,
    /// Session-scoped cache of the stored leaderboard.
    leaderboard: Leaderboard,
    #[getter(skip)]
    ticket: u64,
}

impl<S: SignalSource> SessionController<S> {
    /// Creates an idle controller drawing signals from `source`.
    #[instrument(skip(source))]
    pub fn new(source: S) -> Self {
        Self::with_leaderboard(source, Leaderboard::new())
    }

    /// Creates an idle controller with a pre-loaded leaderboard cache.
    #[instrument(skip(source, leaderboard), fields(entries = leaderboard.len()))]
    pub fn with_leaderboard(source: S, leaderboard: Leaderboard) -> Self {
        info!("Creating session controller");
        Self {
            engine: TurnEngine::new(),
            generator: SequenceGenerator::new(source),
            score: 0,
            active: false,
            pending_score: None,
            leaderboard,
            ticket: 0,
        }
    }

    /// Returns true while a game is running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true while a finished game's score waits for a name.
    pub fn awaiting_name(&self) -> bool {
        self.pending_score.is_some()
    }

    /// Whose turn it is.
    pub fn owner(&self) -> TurnOwner {
        self.engine.owner()
    }

    /// Returns true if `playback` is the most recent one this controller issued.
    pub fn is_current(&self, playback: &Playback) -> bool {
        playback.ticket() == self.ticket
    }

    /// Replaces the leaderboard cache with entries read from the result store.
    #[instrument(skip(self, entries))]
    pub fn hydrate_leaderboard(&mut self, entries: Vec<RoundResult>) {
        self.leaderboard = Leaderboard::from_results(entries);
        debug!(entries = self.leaderboard.len(), "Leaderboard cache hydrated");
    }

    /// Starts a fresh game and returns the first playback.
    ///
    /// Does nothing while a game is running or while a finished game's
    /// result has not been submitted.
    #[instrument(skip(self), fields(active = self.active, owner = %self.engine.owner()))]
    pub fn start_game(&mut self) -> Option<Playback> {
        if self.active && self.engine.owner() != TurnOwner::Idle {
            debug!("Game already active");
            return None;
        }
        if self.pending_score.is_some() {
            debug!("Result awaiting submission");
            return None;
        }

        self.engine.reset();
        self.score = 0;
        if !self.engine.start_round(&mut self.generator) {
            return None;
        }
        self.active = true;
        info!(len = self.engine.sequence().len(), "Game started");
        Some(self.issue_playback(false))
    }

    /// Hands the turn to the user once `playback` has been fully shown.
    ///
    /// Stale playbacks (superseded by a reset or a newer round) are ignored.
    #[instrument(skip(self, playback), fields(ticket = playback.ticket()))]
    pub fn finish_playback(&mut self, playback: &Playback) -> bool {
        if !self.active || !self.is_current(playback) {
            debug!(current = self.ticket, "Ignoring stale playback");
            return false;
        }
        self.engine.complete_playback()
    }

    /// Validates a user press and applies the resulting transition.
    ///
    /// Returns `None` when the press was ignored because the user does not
    /// hold the turn.
    #[instrument(level = "trace", skip(self))]
    pub fn submit_signal(&mut self, signal: Signal) -> Option<TurnEvent> {
        if !self.active {
            return None;
        }
        let event = match self.engine.submit_signal(signal)? {
            MatchResult::Correct => TurnEvent::Correct {
                progress: self.engine.progress(),
            },
            MatchResult::RoundComplete => {
                let playback = self.on_round_complete()?;
                TurnEvent::RoundComplete {
                    score: self.score,
                    playback,
                }
            }
            MatchResult::Mismatch => {
                let score = self.score;
                self.on_mismatch(score);
                TurnEvent::Mismatch { score }
            }
        };
        Some(event)
    }

    /// Records the completed round, grows the sequence and returns the next
    /// playback.
    ///
    /// Only acts right after the engine reported a completed pass (computer
    /// holds the turn with progress at the end of the sequence); returns
    /// `None` and changes nothing otherwise.
    #[instrument(skip(self), fields(owner = %self.engine.owner()))]
    pub fn on_round_complete(&mut self) -> Option<Playback> {
        let completed = self.active
            && self.engine.owner() == TurnOwner::Computer
            && self.engine.progress() == self.engine.sequence().len();
        if !completed {
            debug!(progress = self.engine.progress(), "No completed pass to record");
            return None;
        }
        self.score = u32::try_from(self.engine.sequence().len()).unwrap_or(u32::MAX);
        self.engine.extend_sequence(&mut self.generator);
        info!(
            score = self.score,
            next_len = self.engine.sequence().len(),
            "Round complete"
        );
        Some(self.issue_playback(true))
    }

    /// Ends the game and holds `current_score` until a name is supplied.
    #[instrument(skip(self))]
    pub fn on_mismatch(&mut self, current_score: u32) {
        self.active = false;
        self.pending_score = Some(current_score);
        info!(score = current_score, "Game over");
    }

    /// Validates and records a finished game's result.
    ///
    /// The returned result still has to be forwarded to the persistent
    /// result store by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankName`] for an empty or blank name;
    /// nothing is mutated in that case.
    #[instrument(skip(self, name))]
    pub fn submit_result(
        &mut self,
        name: &str,
        score: u32,
    ) -> Result<RoundResult, ValidationError> {
        let result = RoundResult::new(name, score)?;
        let rank = self.leaderboard.record(result.clone());
        self.pending_score = None;
        info!(name = %result.name(), score, ?rank, "Result recorded");
        Ok(result)
    }

    /// Abandons whatever is in flight and returns to idle.
    ///
    /// Always allowed. Outstanding playbacks become stale; nothing is
    /// written to the result store.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.engine.reset();
        self.score = 0;
        self.active = false;
        self.pending_score = None;
        self.ticket += 1;
        info!("Game reset");
    }

    fn issue_playback(&mut self, lead_in: bool) -> Playback {
        self.ticket += 1;
        Playback::new(self.engine.sequence(), self.ticket, lead_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSignals;

    fn controller(script: &[Signal]) -> SessionController<ScriptedSignals> {
        SessionController::new(ScriptedSignals::new(script.to_vec()))
    }

    #[test]
    fn test_start_game_is_noop_while_active() {
        let mut session = controller(&[Signal::Green]);
        assert!(session.start_game().is_some());
        assert!(session.start_game().is_none());
        assert_eq!(session.engine().sequence().len(), 1);
    }

    #[test]
    fn test_start_game_blocked_until_result_submitted() {
        let mut session = controller(&[Signal::Green]);
        let playback = session.start_game().expect("fresh game");
        session.finish_playback(&playback);
        session.submit_signal(Signal::Red);

        assert!(session.awaiting_name());
        assert!(session.start_game().is_none());

        session.submit_result("Dana", 0).expect("valid name");
        assert!(!session.awaiting_name());
        assert!(session.start_game().is_some());
    }

    #[test]
    fn test_new_playback_makes_old_one_stale() {
        let mut session = controller(&[Signal::Green, Signal::Blue]);
        let first = session.start_game().expect("fresh game");
        assert!(session.finish_playback(&first));

        let second = match session.submit_signal(Signal::Green) {
            Some(TurnEvent::RoundComplete { playback, .. }) => playback,
            other => panic!("expected round complete, got {other:?}"),
        };
        assert!(!session.is_current(&first));
        assert!(!session.finish_playback(&first));
        assert_eq!(session.owner(), TurnOwner::Computer);
        assert!(session.finish_playback(&second));
        assert_eq!(session.owner(), TurnOwner::User);
    }

    #[test]
    fn test_round_complete_requires_a_completed_pass() {
        let mut session = controller(&[Signal::Green, Signal::Red]);
        let playback = session.start_game().expect("fresh game");

        // Computer turn, playback not yet shown.
        assert_eq!(session.on_round_complete(), None);
        assert_eq!(session.engine().sequence().len(), 1);

        // User turn, nothing pressed.
        assert!(session.finish_playback(&playback));
        assert_eq!(session.on_round_complete(), None);
        assert_eq!(session.owner(), TurnOwner::User);
        assert_eq!(session.engine().sequence().len(), 1);
        assert_eq!(*session.score(), 0);
        assert!(session.is_current(&playback));

        // Idle session.
        session.reset_game();
        assert_eq!(session.on_round_complete(), None);
        assert!(session.engine().sequence().is_empty());
    }

    #[test]
    fn test_ignored_press_reports_nothing() {
        let mut session = controller(&[Signal::Yellow]);
        assert_eq!(session.submit_signal(Signal::Yellow), None);
        session.start_game();
        assert_eq!(session.submit_signal(Signal::Yellow), None);
        assert_eq!(session.engine().progress(), 0);
    }
}
