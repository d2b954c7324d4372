//! Win detection for sliding-mark tic-tac-toe.

use crate::player::MAX_ACTIVE_MARKS;
use std::collections::VecDeque;
use tracing::instrument;

/// The 8 winning lines, each a sorted triple of cell indices.
pub const WIN_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks a triple of cells against the win lines, in any order.
pub fn is_win_line(mut cells: [usize; 3]) -> bool {
    cells.sort_unstable();
    WIN_LINES.contains(&cells)
}

/// Returns the sorted winning line formed by a player's active marks.
///
/// Only a full queue can win: a seat never holds more than three marks.
#[instrument]
pub fn winning_line(active_cells: &VecDeque<usize>) -> Option<[usize; 3]> {
    if active_cells.len() != MAX_ACTIVE_MARKS {
        return None;
    }

    let mut line = [active_cells[0], active_cells[1], active_cells[2]];
    line.sort_unstable();
    WIN_LINES.contains(&line).then_some(line)
}
