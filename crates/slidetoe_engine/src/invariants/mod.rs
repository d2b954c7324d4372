//! First-class invariants for sliding-mark tic-tac-toe.
//!
//! Invariants are structural properties of a [`MatchState`](crate::MatchState)
//! that hold after every engine operation. A violation is a programming
//! defect, never a runtime condition; the engine checks them in debug builds.

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

/// A set of invariants that can be checked together.
///
/// Implemented for triples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod match_progress;
pub mod queue_bounded;
pub mod queue_matches_board;

pub use match_progress::MatchProgressInvariant;
pub use queue_bounded::QueueBoundedInvariant;
pub use queue_matches_board::QueueMatchesBoardInvariant;

/// All match invariants as a composable set.
pub type MatchInvariants = (
    QueueBoundedInvariant,
    QueueMatchesBoardInvariant,
    MatchProgressInvariant,
);

/// Joins violation descriptions for logs and panic messages.
pub fn describe(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, GameEngine, MatchState, PlayerId};

    fn running_engine() -> GameEngine {
        let mut engine = GameEngine::default();
        engine.resume().expect("fresh match resumes");
        engine
    }

    #[test]
    fn test_invariant_set_holds_for_fresh_match() {
        assert!(MatchInvariants::check_all(&MatchState::default()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_sliding_moves() {
        let mut engine = running_engine();
        for cell in [0, 4, 1, 8, 5, 3, 6] {
            engine.apply_move(cell).expect("legal move");
        }
        assert!(MatchInvariants::check_all(engine.state()).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_stray_mark() {
        let mut state = MatchState::default();
        state.board.set(4, Cell::Mark(PlayerId::P1));

        let violations = MatchInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            QueueMatchesBoardInvariant::description()
        );
    }

    #[test]
    fn test_describe_joins_descriptions() {
        let violations = vec![InvariantViolation::new("a"), InvariantViolation::new("b")];
        assert_eq!(describe(&violations), "a; b");
    }
}
