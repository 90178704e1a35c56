//! Core domain types: the four signals and the cues they trigger.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the four colored pads.
///
/// Signals carry no ordering semantics, only identity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Signal {
    /// Green pad.
    Green,
    /// Red pad.
    Red,
    /// Yellow pad.
    Yellow,
    /// Blue pad.
    Blue,
}

impl Signal {
    /// All four signals.
    pub const ALL: [Signal; 4] = [Signal::Green, Signal::Red, Signal::Yellow, Signal::Blue];

    /// Returns the display label for this signal.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Signal::Green => "Green",
            Signal::Red => "Red",
            Signal::Yellow => "Yellow",
            Signal::Blue => "Blue",
        }
    }

    /// Creates a signal from its index in [`Signal::ALL`].
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the index of this signal in [`Signal::ALL`].
    pub fn to_index(self) -> usize {
        match self {
            Signal::Green => 0,
            Signal::Red => 1,
            Signal::Yellow => 2,
            Signal::Blue => 3,
        }
    }
}

/// A sound cue requested from the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Cue {
    /// The tone belonging to a signal.
    #[display("{}", _0)]
    Signal(Signal),
    /// The buzzer played on a mismatch.
    #[display("wrong")]
    Wrong,
}

impl From<Signal> for Cue {
    fn from(signal: Signal) -> Self {
        Cue::Signal(signal)
    }
}
