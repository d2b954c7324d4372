//! Match-progress invariant: scores and the match winner agree with the threshold.

use super::Invariant;
use crate::MatchState;

/// Invariant: no score passes the match threshold, and a recorded match
/// winner has reached it with nobody left to move.
pub struct MatchProgressInvariant;

impl Invariant<MatchState> for MatchProgressInvariant {
    fn holds(state: &MatchState) -> bool {
        let threshold = state.max_wins_to_end_match();
        let scores_bounded = state.players().iter().all(|p| p.score() <= threshold);

        let winner_consistent = match state.match_winner() {
            Some(winner) => {
                state.active_player().is_none() && state.player(winner).score() >= threshold
            }
            None => state.players().iter().all(|p| p.score() < threshold),
        };

        scores_bounded && winner_consistent
    }

    fn description() -> &'static str {
        "Scores stay within the match threshold and agree with the match winner"
    }
}
