//! Turn engine: the authoritative sequence, the player's progress, and
//! whose turn it is.
//!
//! Turn ownership doubles as the input lock. Presses submitted while the
//! computer is playing back, or while no round is running, are dropped
//! without touching any state.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::invariants::assert_invariants;
use crate::{Sequence, SequenceGenerator, Signal, SignalSource};

/// Who may act right now.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum TurnOwner {
    /// No round is running.
    #[default]
    Idle,
    /// The computer is playing the sequence back.
    Computer,
    /// The user is repeating the sequence.
    User,
}

/// Outcome of validating one user press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    /// The press matched; more presses are expected.
    Correct,
    /// The press did not match; the round is over.
    Mismatch,
    /// The press matched and completed the sequence.
    RoundComplete,
}

/// State machine for one round at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnEngine {
    sequence: Sequence,
    progress: usize,
    owner: TurnOwner,
}

impl TurnEngine {
    /// Creates an idle engine with an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current sequence.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Number of signals the user has reproduced in the current pass.
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Whose turn it is.
    pub fn owner(&self) -> TurnOwner {
        self.owner
    }

    /// Hands the turn to the computer.
    ///
    /// A round never starts against an empty sequence: the first signal is
    /// drawn here if needed. Returns false (and changes nothing) unless the
    /// engine is idle.
    #[instrument(skip_all, fields(owner = %self.owner, len = self.sequence.len()))]
    pub fn start_round<S: SignalSource>(&mut self, generator: &mut SequenceGenerator<S>) -> bool {
        if self.owner != TurnOwner::Idle {
            debug!("Round already running");
            return false;
        }
        if self.sequence.is_empty() {
            self.extend_sequence(generator);
        }
        self.owner = TurnOwner::Computer;
        self.progress = 0;
        assert_invariants(self);
        true
    }

    /// Appends one signal for the next round.
    #[instrument(skip_all, fields(len = self.sequence.len()))]
    pub fn extend_sequence<S: SignalSource>(&mut self, generator: &mut SequenceGenerator<S>) {
        self.sequence = generator.extend(std::mem::take(&mut self.sequence));
    }

    /// Ends computer playback and opens a fresh input pass for the user.
    ///
    /// Returns false (and changes nothing) unless the computer holds the turn.
    #[instrument(skip(self), fields(owner = %self.owner))]
    pub fn complete_playback(&mut self) -> bool {
        if self.owner != TurnOwner::Computer {
            return false;
        }
        self.owner = TurnOwner::User;
        self.progress = 0;
        assert_invariants(self);
        debug!(len = self.sequence.len(), "User turn begins");
        true
    }

    /// Validates one user press against the sequence.
    ///
    /// Returns `None` when the user does not hold the turn; the press is
    /// ignored.
    #[instrument(level = "trace", skip(self))]
    pub fn submit_signal(&mut self, signal: Signal) -> Option<MatchResult> {
        if self.owner != TurnOwner::User {
            return None;
        }

        let expected = self.sequence.get(self.progress)?;
        let result = if signal != expected {
            self.progress = 0;
            self.owner = TurnOwner::Idle;
            MatchResult::Mismatch
        } else if self.progress + 1 == self.sequence.len() {
            self.progress = self.sequence.len();
            self.owner = TurnOwner::Computer;
            MatchResult::RoundComplete
        } else {
            self.progress += 1;
            MatchResult::Correct
        };

        assert_invariants(self);
        debug!(%signal, %expected, ?result, progress = self.progress, "Press validated");
        Some(result)
    }

    /// Clears everything and returns to idle.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.sequence.clear();
        self.progress = 0;
        self.owner = TurnOwner::Idle;
        assert_invariants(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSignals;

    fn engine_in_user_turn(script: &[Signal]) -> (TurnEngine, SequenceGenerator<ScriptedSignals>) {
        let mut generator = SequenceGenerator::new(ScriptedSignals::new(script.to_vec()));
        let mut engine = TurnEngine::new();
        engine.start_round(&mut generator);
        for _ in 1..script.len() {
            engine.extend_sequence(&mut generator);
        }
        engine.complete_playback();
        (engine, generator)
    }

    #[test]
    fn test_start_round_synthesizes_first_signal() {
        let mut generator = SequenceGenerator::new(ScriptedSignals::new([Signal::Green]));
        let mut engine = TurnEngine::new();

        assert!(engine.start_round(&mut generator));
        assert_eq!(engine.owner(), TurnOwner::Computer);
        assert_eq!(engine.sequence().signals(), &[Signal::Green]);
    }

    #[test]
    fn test_start_round_requires_idle() {
        let (mut engine, mut generator) = engine_in_user_turn(&[Signal::Red]);
        assert!(!engine.start_round(&mut generator));
        assert_eq!(engine.owner(), TurnOwner::User);
        assert_eq!(engine.sequence().len(), 1);
    }

    #[test]
    fn test_correct_then_round_complete() {
        let (mut engine, _) = engine_in_user_turn(&[Signal::Red, Signal::Yellow]);

        assert_eq!(engine.submit_signal(Signal::Red), Some(MatchResult::Correct));
        assert_eq!(engine.progress(), 1);
        assert_eq!(engine.owner(), TurnOwner::User);

        assert_eq!(engine.submit_signal(Signal::Yellow), Some(MatchResult::RoundComplete));
        assert_eq!(engine.progress(), 2);
        assert_eq!(engine.owner(), TurnOwner::Computer);
    }

    #[test]
    fn test_mismatch_deep_in_sequence_resets() {
        let script = [Signal::Green, Signal::Red, Signal::Blue, Signal::Yellow];
        let (mut engine, _) = engine_in_user_turn(&script);

        engine.submit_signal(Signal::Green);
        engine.submit_signal(Signal::Red);
        engine.submit_signal(Signal::Blue);
        assert_eq!(engine.submit_signal(Signal::Green), Some(MatchResult::Mismatch));
        assert_eq!(engine.progress(), 0);
        assert_eq!(engine.owner(), TurnOwner::Idle);
    }

    #[test]
    fn test_press_during_playback_is_ignored() {
        let mut generator = SequenceGenerator::new(ScriptedSignals::new([Signal::Blue]));
        let mut engine = TurnEngine::new();
        engine.start_round(&mut generator);
        let before = engine.clone();

        assert_eq!(engine.submit_signal(Signal::Blue), None);
        assert_eq!(engine, before);
    }

    #[test]
    fn test_complete_playback_requires_computer_turn() {
        let mut engine = TurnEngine::new();
        assert!(!engine.complete_playback());
        assert_eq!(engine.owner(), TurnOwner::Idle);
    }

    #[test]
    fn test_reset_from_any_state() {
        let (mut engine, _) = engine_in_user_turn(&[Signal::Green, Signal::Green]);
        engine.submit_signal(Signal::Green);
        engine.reset();
        assert_eq!(engine, TurnEngine::new());
    }
}
