//! Computer playback as an explicit, caller-driven stepper.
//!
//! A [`Playback`] yields one [`PlaybackStep`] at a time. The caller applies
//! the step (light a pad, ring a cue), waits [`PlaybackStep::delay`], then
//! asks for the next one. Once the iterator is exhausted the caller hands
//! the turn to the user through the session controller.

use std::iter::FusedIterator;
use std::time::Duration;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::{Cue, Sequence, Signal};

/// Timing of playback and feedback, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// How long a signal stays lit during playback.
    pulse_ms: u64,
    /// Dark gap after each signal.
    settle_ms: u64,
    /// Pause before the playback of every round after the first.
    round_pause_ms: u64,
    /// Delay after the user's final press before the next round begins.
    feedback_ms: u64,
    /// How long a user press stays lit.
    flash_ms: u64,
}

impl Pacing {
    /// Creates a pacing profile.
    pub fn new(
        pulse_ms: u64,
        settle_ms: u64,
        round_pause_ms: u64,
        feedback_ms: u64,
        flash_ms: u64,
    ) -> Self {
        Self {
            pulse_ms,
            settle_ms,
            round_pause_ms,
            feedback_ms,
            flash_ms,
        }
    }

    /// Lit duration of one playback pulse.
    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    /// Dark gap between pulses.
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Lead-in pause before a follow-up round.
    pub fn round_pause(&self) -> Duration {
        Duration::from_millis(self.round_pause_ms)
    }

    /// Delay between the completing press and the next playback.
    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }

    /// Lit duration of a user press.
    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(1000, 300, 1000, 500, 300)
    }
}

/// One step of computer playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackStep {
    /// Pause before a follow-up round; nothing is lit.
    LeadIn,
    /// Light the signal and play its cue.
    Pulse {
        /// Position of the signal in the sequence.
        index: usize,
        /// The signal to show.
        signal: Signal,
    },
    /// Turn the light off again.
    Release {
        /// Position of the released signal in the sequence.
        index: usize,
    },
}

impl PlaybackStep {
    /// How long to wait after applying this step before the next one.
    pub fn delay(&self, pacing: &Pacing) -> Duration {
        match self {
            PlaybackStep::LeadIn => pacing.round_pause(),
            PlaybackStep::Pulse { .. } => pacing.pulse(),
            PlaybackStep::Release { .. } => pacing.settle(),
        }
    }

    /// The signal lit while this step is in effect.
    pub fn active_signal(&self) -> Option<Signal> {
        match self {
            PlaybackStep::Pulse { signal, .. } => Some(*signal),
            PlaybackStep::LeadIn | PlaybackStep::Release { .. } => None,
        }
    }

    /// The cue to trigger when this step is applied.
    pub fn cue(&self) -> Option<Cue> {
        self.active_signal().map(Cue::Signal)
    }
}

/// Lazy, finite playback of one round's sequence.
///
/// Re-fetching a playback from the controller restarts it from the first
/// step. The ticket ties the playback to the controller state that issued
/// it; once the controller moves on, the ticket is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    signals: Vec<Signal>,
    ticket: u64,
    lead_in: bool,
    cursor: usize,
}

impl Playback {
    /// Creates a playback over a snapshot of `sequence`.
    pub fn new(sequence: &Sequence, ticket: u64, lead_in: bool) -> Self {
        Self {
            signals: sequence.signals().to_vec(),
            ticket,
            lead_in,
            cursor: 0,
        }
    }

    /// Ticket issued by the controller.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Signals being played back.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Returns true if this playback opens with a lead-in pause.
    pub fn has_lead_in(&self) -> bool {
        self.lead_in
    }

    fn total_steps(&self) -> usize {
        self.signals.len() * 2 + usize::from(self.lead_in)
    }
}

impl Iterator for Playback {
    type Item = PlaybackStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.total_steps() {
            return None;
        }
        let position = self.cursor;
        self.cursor += 1;

        let position = if self.lead_in {
            if position == 0 {
                return Some(PlaybackStep::LeadIn);
            }
            position - 1
        } else {
            position
        };

        let index = position / 2;
        if position % 2 == 0 {
            Some(PlaybackStep::Pulse {
                index,
                signal: self.signals[index],
            })
        } else {
            Some(PlaybackStep::Release { index })
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_steps().saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Playback {}

impl FusedIterator for Playback {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScriptedSignals, SequenceGenerator};

    fn sequence_of(signals: &[Signal]) -> Sequence {
        let mut generator = SequenceGenerator::new(ScriptedSignals::new(signals.to_vec()));
        signals
            .iter()
            .fold(Sequence::new(), |sequence, _| generator.extend(sequence))
    }

    #[test]
    fn test_steps_pulse_then_release_in_order() {
        let sequence = sequence_of(&[Signal::Green, Signal::Blue]);
        let steps: Vec<PlaybackStep> = Playback::new(&sequence, 1, false).collect();
        assert_eq!(
            steps,
            vec![
                PlaybackStep::Pulse {
                    index: 0,
                    signal: Signal::Green,
                },
                PlaybackStep::Release { index: 0 },
                PlaybackStep::Pulse {
                    index: 1,
                    signal: Signal::Blue,
                },
                PlaybackStep::Release { index: 1 },
            ]
        );
    }

    #[test]
    fn test_lead_in_comes_first() {
        let sequence = sequence_of(&[Signal::Red]);
        let mut playback = Playback::new(&sequence, 3, true);
        assert_eq!(playback.len(), 3);
        assert_eq!(playback.next(), Some(PlaybackStep::LeadIn));
        assert_eq!(
            playback.next(),
            Some(PlaybackStep::Pulse {
                index: 0,
                signal: Signal::Red,
            })
        );
        assert_eq!(playback.next(), Some(PlaybackStep::Release { index: 0 }));
        assert_eq!(playback.next(), None);
        assert_eq!(playback.next(), None);
    }

    #[test]
    fn test_snapshot_is_restartable() {
        let sequence = sequence_of(&[Signal::Yellow, Signal::Yellow, Signal::Green]);
        let first: Vec<PlaybackStep> = Playback::new(&sequence, 9, false).collect();
        let again: Vec<PlaybackStep> = Playback::new(&sequence, 9, false).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_step_delays_follow_pacing() {
        let pacing = Pacing::new(800, 200, 1200, 400, 250);
        assert_eq!(PlaybackStep::LeadIn.delay(&pacing), Duration::from_millis(1200));
        assert_eq!(
            PlaybackStep::Pulse {
                index: 0,
                signal: Signal::Red,
            }
            .delay(&pacing),
            Duration::from_millis(800)
        );
        assert_eq!(PlaybackStep::Release { index: 0 }.delay(&pacing), Duration::from_millis(200));
        assert_eq!(PlaybackStep::Release { index: 0 }.cue(), None);
    }
}
