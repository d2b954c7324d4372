//! Turn order and the focus-mode gate.

use super::action::{ControlOutcome, RoundStartError};
use super::{MatchState, PlayerId};
use tracing::{debug, info, instrument};

/// Decides whose turn it is and whether moves are accepted.
///
/// Stateless: every operation works on the caller's [`MatchState`].
/// Pausing and resuming never touch the board or the scores.
pub struct TurnScheduler;

impl TurnScheduler {
    /// Passes the turn to the other seat. No effect between rounds.
    #[instrument(skip(state), fields(active = ?state.active_player))]
    pub fn advance_turn(state: &mut MatchState) -> Option<PlayerId> {
        state.active_player = state.active_player.map(PlayerId::opponent);
        debug!(next = ?state.active_player, "Turn advanced");
        state.active_player
    }

    /// Assigns the opening seat for the current round by parity.
    ///
    /// Does not look at the pause gate; callers decide when a round may open.
    #[instrument(skip(state), fields(round = state.round_number))]
    pub fn open_round(state: &mut MatchState) -> Result<PlayerId, RoundStartError> {
        if let Some(winner) = state.match_winner {
            return Err(RoundStartError::MatchOver(winner));
        }
        if let Some(active) = state.active_player {
            return Err(RoundStartError::RoundInProgress(active));
        }

        let opener = PlayerId::opening(state.round_number);
        state.active_player = Some(opener);
        info!(round = state.round_number, opener = ?opener, "Round started");
        Ok(opener)
    }

    /// Leaves focus mode, keeping the active seat. Idempotent.
    #[instrument(skip(state), fields(paused = state.paused))]
    pub fn pause(state: &mut MatchState) -> ControlOutcome {
        if state.paused {
            debug!("Already paused");
            return ControlOutcome::Unchanged;
        }

        state.paused = true;
        debug!(active = ?state.active_player, "Focus mode left");
        ControlOutcome::Paused
    }

    /// Enters focus mode. Idempotent.
    ///
    /// With nobody to move, the round is opened first; the seat already
    /// to move is never reselected. A won match stays paused.
    #[instrument(skip(state), fields(paused = state.paused, active = ?state.active_player))]
    pub fn resume(state: &mut MatchState) -> Result<ControlOutcome, RoundStartError> {
        if !state.paused {
            debug!("Already in focus mode");
            return Ok(ControlOutcome::Unchanged);
        }

        let (active_player, round_started) = match state.active_player {
            Some(active) => (active, false),
            None => (Self::open_round(state)?, true),
        };

        state.paused = false;
        debug!(active = ?active_player, round_started, "Focus mode entered");
        Ok(ControlOutcome::Resumed {
            active_player,
            round_started,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_turn_between_rounds_is_noop() {
        let mut state = MatchState::default();
        assert_eq!(TurnScheduler::advance_turn(&mut state), None);
        assert_eq!(state.active_player(), None);
    }

    #[test]
    fn test_advance_turn_alternates() {
        let mut state = MatchState::default();
        state.active_player = Some(PlayerId::P1);
        assert_eq!(TurnScheduler::advance_turn(&mut state), Some(PlayerId::P2));
        assert_eq!(TurnScheduler::advance_turn(&mut state), Some(PlayerId::P1));
    }

    #[test]
    fn test_resume_opens_round_by_parity() {
        let mut state = MatchState::default();
        state.round_number = 1;
        assert_eq!(
            TurnScheduler::resume(&mut state),
            Ok(ControlOutcome::Resumed {
                active_player: PlayerId::P2,
                round_started: true,
            })
        );
        assert!(!state.is_paused());
    }

    #[test]
    fn test_resume_keeps_active_player() {
        let mut state = MatchState::default();
        state.round_number = 0;
        state.active_player = Some(PlayerId::P2);
        assert_eq!(
            TurnScheduler::resume(&mut state),
            Ok(ControlOutcome::Resumed {
                active_player: PlayerId::P2,
                round_started: false,
            })
        );
    }

    #[test]
    fn test_pause_and_resume_are_idempotent() {
        let mut state = MatchState::default();
        assert_eq!(TurnScheduler::pause(&mut state), ControlOutcome::Unchanged);
        assert!(TurnScheduler::resume(&mut state).is_ok());
        assert_eq!(
            TurnScheduler::resume(&mut state),
            Ok(ControlOutcome::Unchanged)
        );
        assert_eq!(TurnScheduler::pause(&mut state), ControlOutcome::Paused);
        assert_eq!(TurnScheduler::pause(&mut state), ControlOutcome::Unchanged);
    }

    #[test]
    fn test_resume_after_match_won_stays_paused() {
        let mut state = MatchState::default();
        state.player_mut(PlayerId::P1).set_score(3);
        state.match_winner = Some(PlayerId::P1);
        assert_eq!(
            TurnScheduler::resume(&mut state),
            Err(RoundStartError::MatchOver(PlayerId::P1))
        );
        assert!(state.is_paused());
    }
}
