//! Strictly Simon - pure game logic for a Simon-style memory game.
//!
//! The computer plays a growing sequence of four colored signals; the
//! player repeats it. The first wrong press ends the game.
//!
//! # Architecture
//!
//! - **Sequence**: append-only signal pattern grown by a [`SequenceGenerator`]
//!   drawing from an injected [`SignalSource`]
//! - **Engine**: [`TurnEngine`] owns the sequence, the player's progress and
//!   the turn owner, and validates every press
//! - **Playback**: [`Playback`] exposes the computer's turn as explicit,
//!   caller-driven steps
//! - **Session**: [`SessionController`] runs start/reset/game-over
//!   transitions, keeps score and records results
//!
//! # Example
//!
//! ```
//! use strictly_simon::{ScriptedSignals, SessionController, Signal, TurnEvent, TurnOwner};
//!
//! let mut session = SessionController::new(ScriptedSignals::new([Signal::Green, Signal::Red]));
//! let playback = session.start_game().expect("idle session starts");
//! for _step in playback.clone() {
//!     // light the pad, play the cue, wait
//! }
//! session.finish_playback(&playback);
//! assert_eq!(session.owner(), TurnOwner::User);
//!
//! match session.submit_signal(Signal::Green) {
//!     Some(TurnEvent::RoundComplete { score, .. }) => assert_eq!(score, 1),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod engine;
mod invariants;
mod leaderboard;
mod playback;
mod sequence;
mod session;
mod signal;

// Crate-level exports - Signals
pub use signal::{Cue, Signal};

// Crate-level exports - Sequence generation
pub use sequence::{RandomSignals, ScriptedSignals, Sequence, SequenceGenerator, SignalSource};

// Crate-level exports - Turn engine
pub use engine::{MatchResult, TurnEngine, TurnOwner};

// Crate-level exports - Invariants
pub use invariants::{
    ActiveTurnHasSequence, EngineInvariants, IdleHasNoProgress, Invariant, InvariantSet,
    InvariantViolation, ProgressWithinSequence, UserTurnAwaitsSignal,
};

// Crate-level exports - Playback
pub use playback::{Pacing, Playback, PlaybackStep};

// Crate-level exports - Results
pub use leaderboard::{LEADERBOARD_CAPACITY, Leaderboard, RoundResult, ValidationError};

// Crate-level exports - Session
pub use session::{SessionController, TurnEvent};
