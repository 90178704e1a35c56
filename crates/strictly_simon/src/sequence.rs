//! The running signal sequence and the generator that grows it.
//!
//! Randomness is a capability ([`SignalSource`]) handed to the generator,
//! so tests can build exact sequences with [`ScriptedSignals`] or replay a
//! seeded [`RandomSignals`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::Signal;

/// Ordered, append-only pattern the player must reproduce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    signals: Vec<Signal>,
}

impl Sequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of signals in the sequence.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Returns true if no signal has been generated yet.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Signal at the given position.
    pub fn get(&self, index: usize) -> Option<Signal> {
        self.signals.get(index).copied()
    }

    /// All signals, oldest first.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub(crate) fn push(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    pub(crate) fn clear(&mut self) {
        self.signals.clear();
    }
}

/// Source of the next signal to append.
pub trait SignalSource {
    /// Draws one signal.
    fn next_signal(&mut self) -> Signal;
}

/// Uniform random signals backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomSignals<R> {
    rng: R,
}

impl<R: Rng> RandomSignals<R> {
    /// Wraps an existing random number generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSignals<ChaCha8Rng> {
    /// Deterministic source: the same seed always yields the same signals.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Source seeded from operating-system entropy.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> SignalSource for RandomSignals<R> {
    fn next_signal(&mut self) -> Signal {
        Signal::ALL[self.rng.gen_range(0..Signal::ALL.len())]
    }
}

/// Replays a fixed script of signals, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSignals {
    script: Vec<Signal>,
    cursor: usize,
}

impl ScriptedSignals {
    /// Creates a scripted source.
    ///
    /// An empty script falls back to [`Signal::Green`] forever.
    pub fn new(script: impl Into<Vec<Signal>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }
}

impl SignalSource for ScriptedSignals {
    fn next_signal(&mut self) -> Signal {
        if self.script.is_empty() {
            return Signal::Green;
        }
        let signal = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        signal
    }
}

/// Appends randomly chosen signals to a sequence.
#[derive(Debug, Clone)]
pub struct SequenceGenerator<S> {
    source: S,
}

impl<S: SignalSource> SequenceGenerator<S> {
    /// Creates a generator drawing from the given source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Appends one signal to `sequence` and returns the grown sequence.
    #[instrument(skip_all, fields(len = sequence.len()))]
    pub fn extend(&mut self, mut sequence: Sequence) -> Sequence {
        let signal = self.source.next_signal();
        sequence.push(signal);
        debug!(%signal, len = sequence.len(), "Sequence extended");
        sequence
    }
}
