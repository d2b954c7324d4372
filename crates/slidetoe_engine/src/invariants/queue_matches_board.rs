//! Queue-matches-board invariant: the sliding queue mirrors the board.

use super::Invariant;
use crate::{Cell, MatchState};

/// Invariant: every queued index holds its seat's mark, and the board has no
/// other marks of that seat.
pub struct QueueMatchesBoardInvariant;

impl Invariant<MatchState> for QueueMatchesBoardInvariant {
    fn holds(state: &MatchState) -> bool {
        let board = state.board();
        state.players().iter().all(|player| {
            let cells = player.active_cells();
            board.count_marks(player.id()) == cells.len()
                && cells
                    .iter()
                    .all(|&i| board.get(i) == Some(Cell::Mark(player.id())))
        })
    }

    fn description() -> &'static str {
        "Active-cell queues match the marks on the board"
    }
}
