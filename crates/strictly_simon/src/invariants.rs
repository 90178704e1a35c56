//! First-class invariants for the turn engine.
//!
//! Invariants are logical properties that must hold after every engine
//! transition. They are checked in debug builds and tested independently.

use tracing::warn;

use crate::{TurnEngine, TurnOwner};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Invariants checked together against one state.
pub trait InvariantSet<S> {
    /// Collects every violated invariant, in declaration order.
    fn violations(state: &S) -> Vec<InvariantViolation>;

    /// `Ok` when every invariant holds.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations = Self::violations(state);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn violations(state: &S) -> Vec<InvariantViolation> {
                [$(($inv::holds(state), $inv::description())),+]
                    .into_iter()
                    .filter(|(holds, _)| !holds)
                    .map(|(_, description)| InvariantViolation::new(description))
                    .collect()
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

/// Invariant: `0 <= progress <= len(sequence)`.
pub struct ProgressWithinSequence;

impl Invariant<TurnEngine> for ProgressWithinSequence {
    fn holds(engine: &TurnEngine) -> bool {
        engine.progress() <= engine.sequence().len()
    }

    fn description() -> &'static str {
        "Progress never runs past the end of the sequence"
    }
}

/// Invariant: a computer or user turn always has something to play or match.
pub struct ActiveTurnHasSequence;

impl Invariant<TurnEngine> for ActiveTurnHasSequence {
    fn holds(engine: &TurnEngine) -> bool {
        engine.owner() == TurnOwner::Idle || !engine.sequence().is_empty()
    }

    fn description() -> &'static str {
        "Computer and user turns never run against an empty sequence"
    }
}

/// Invariant: an idle engine carries no input progress.
pub struct IdleHasNoProgress;

impl Invariant<TurnEngine> for IdleHasNoProgress {
    fn holds(engine: &TurnEngine) -> bool {
        engine.owner() != TurnOwner::Idle || engine.progress() == 0
    }

    fn description() -> &'static str {
        "Idle engine has progress reset to zero"
    }
}

/// Invariant: while the user repeats, at least one signal is still expected.
pub struct UserTurnAwaitsSignal;

impl Invariant<TurnEngine> for UserTurnAwaitsSignal {
    fn holds(engine: &TurnEngine) -> bool {
        engine.owner() != TurnOwner::User || engine.progress() < engine.sequence().len()
    }

    fn description() -> &'static str {
        "User turn ends as soon as the last signal is matched"
    }
}

/// All turn engine invariants as a composable set.
pub type EngineInvariants = (
    ProgressWithinSequence,
    ActiveTurnHasSequence,
    IdleHasNoProgress,
    UserTurnAwaitsSignal,
);

/// Asserts that all engine invariants hold (panics on violation in debug builds).
pub(crate) fn assert_invariants(engine: &TurnEngine) {
    if let Err(violations) = EngineInvariants::check_all(engine) {
        for violation in &violations {
            warn!(description = %violation.description, "Engine invariant violated");
        }
        debug_assert!(violations.is_empty(), "Engine invariants violated: {violations:?}");
    }
}
