//! Queue-bounded invariant: at most three distinct, in-bounds active marks per seat.

use super::Invariant;
use crate::MatchState;
use crate::player::MAX_ACTIVE_MARKS;
use crate::types::CELL_COUNT;

/// Invariant: each sliding queue holds at most three distinct cell indices.
pub struct QueueBoundedInvariant;

impl Invariant<MatchState> for QueueBoundedInvariant {
    fn holds(state: &MatchState) -> bool {
        state.players().iter().all(|player| {
            let cells = player.active_cells();
            cells.len() <= MAX_ACTIVE_MARKS
                && cells.iter().all(|&i| i < CELL_COUNT)
                && cells
                    .iter()
                    .enumerate()
                    .all(|(n, cell)| !cells.iter().skip(n + 1).any(|other| other == cell))
        })
    }

    fn description() -> &'static str {
        "Each seat has at most three distinct active marks"
    }
}
