//! Contract-based validation for sliding-mark tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P} action {Q}`. Preconditions are always checked and turn into
//! [`MoveRejection`]s; postconditions are checked in debug builds and a
//! failure there is a defect.

use super::action::{MoveRejection, MoveRequest};
use super::invariants::{InvariantSet, InvariantViolation, MatchInvariants, describe};
use super::{MatchState, PlayerId};
use tracing::{error, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveRejection>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the match is in focus mode.
pub struct NotPaused;

impl NotPaused {
    /// Fails with [`MoveRejection::Paused`] outside focus mode.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), MoveRejection> {
        if state.is_paused() {
            Err(MoveRejection::Paused)
        } else {
            Ok(())
        }
    }
}

/// Precondition: a round is running. Yields the seat to move.
pub struct HasActivePlayer;

impl HasActivePlayer {
    /// Returns the seat to move, or [`MoveRejection::NoActivePlayer`].
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<PlayerId, MoveRejection> {
        state.active_player().ok_or(MoveRejection::NoActivePlayer)
    }
}

/// Precondition: the target names a cell.
pub struct CellInBounds;

impl CellInBounds {
    /// Fails with [`MoveRejection::OutOfBounds`] past cell 8.
    #[instrument(skip(state))]
    pub fn check(request: &MoveRequest, state: &MatchState) -> Result<(), MoveRejection> {
        match state.board().get(request.cell_index) {
            Some(_) => Ok(()),
            None => Err(MoveRejection::OutOfBounds(request.cell_index)),
        }
    }
}

/// Precondition: the target cell holds no mark.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`MoveRejection::CellOccupied`] on a marked cell.
    #[instrument(skip(state))]
    pub fn check(request: &MoveRequest, state: &MatchState) -> Result<(), MoveRejection> {
        if state.board().is_empty(request.cell_index) {
            Ok(())
        } else {
            Err(MoveRejection::CellOccupied(request.cell_index))
        }
    }
}

/// Composite precondition for a move, checked in gate order: pause first,
/// so a paused match rejects any request regardless of the cell.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions and returns the seat that will move.
    #[instrument(skip(state))]
    pub fn check(request: &MoveRequest, state: &MatchState) -> Result<PlayerId, MoveRejection> {
        NotPaused::check(state)?;
        let player = HasActivePlayer::check(state)?;
        CellInBounds::check(request, state)?;
        CellIsEmpty::check(request, state)?;
        Ok(player)
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move requests.
///
/// Postconditions:
/// - All match invariants hold
/// - Scores never decrease and rise by at most one in total
/// - The round counter never decreases
pub struct MoveContract;

impl Contract<MatchState, MoveRequest> for MoveContract {
    fn pre(state: &MatchState, action: &MoveRequest) -> Result<(), MoveRejection> {
        LegalMove::check(action, state).map(|_| ())
    }

    fn post(before: &MatchState, after: &MatchState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = MatchInvariants::check_all(after).err().unwrap_or_default();

        let gained: Option<u32> = PlayerId::ALL.iter().try_fold(0, |total, &id| {
            after
                .player(id)
                .score()
                .checked_sub(before.player(id).score())
                .map(|gain| total + gain)
        });
        if !matches!(gained, Some(0 | 1)) {
            violations.push(InvariantViolation::new(
                "A move raises at most one score by one",
            ));
        }

        if after.round_number() < before.round_number() {
            violations.push(InvariantViolation::new("Round counter never decreases"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(violations = %describe(&violations), "Move postcondition failed");
            Err(violations)
        }
    }
}

/// Fails fast when the match invariants are broken (debug builds only).
#[instrument(skip(state))]
pub fn assert_invariants(state: &MatchState) {
    if cfg!(debug_assertions)
        && let Err(violations) = MatchInvariants::check_all(state)
    {
        let descriptions = describe(&violations);
        error!(%descriptions, "Match invariants violated");
        panic!("Match invariants violated: {descriptions}");
    }
}

/// Fails fast when a move broke its postconditions (debug builds only).
#[instrument(skip(before, after))]
pub fn assert_move_postconditions(before: &MatchState, after: &MatchState) {
    if cfg!(debug_assertions)
        && let Err(violations) = MoveContract::post(before, after)
    {
        panic!("Move postconditions violated: {}", describe(&violations));
    }
}
