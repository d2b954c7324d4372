//! Core domain types for sliding-mark tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// One of the two seats in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum PlayerId {
    /// First seat, plays `X` and opens even rounds.
    P1,
    /// Second seat, plays `O` and opens odd rounds.
    P2,
}

impl PlayerId {
    /// Both seats in seat order.
    pub const ALL: [PlayerId; 2] = [PlayerId::P1, PlayerId::P2];

    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::P1 => PlayerId::P2,
            PlayerId::P2 => PlayerId::P1,
        }
    }

    /// Seat index (0 or 1).
    pub fn index(self) -> usize {
        match self {
            PlayerId::P1 => 0,
            PlayerId::P2 => 1,
        }
    }

    /// Symbol drawn for this seat's marks.
    pub fn mark(self) -> char {
        match self {
            PlayerId::P1 => 'X',
            PlayerId::P2 => 'O',
        }
    }

    /// Seat that opens the given round: even rounds go to `P1`, odd rounds to `P2`.
    #[instrument]
    pub fn opening(round_number: u32) -> Self {
        if round_number % 2 == 0 {
            PlayerId::P1
        } else {
            PlayerId::P2
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed here.
    Empty,
    /// Holds one of the player's active marks.
    Mark(PlayerId),
}

/// 3x3 board in row-major order (0-8).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Gets the cell at the given index, `None` when out of bounds.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks whether the cell exists and holds no mark.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Indices of the cells holding no mark.
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&i| self.is_empty(i)).collect()
    }

    /// Counts the cells marked by `player`.
    pub fn count_marks(&self, player: PlayerId) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Mark(player))
            .count()
    }

    /// Sets a cell. Callers validate the index first.
    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        debug_assert!(index < CELL_COUNT, "cell index {index} out of bounds");
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
    }

    /// Empties every cell.
    pub(crate) fn clear(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    /// Formats the board as text, numbering empty cells by index.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => char::from(b'0' + index as u8),
                    Cell::Mark(player) => player.mark(),
                };
                result.push(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}
