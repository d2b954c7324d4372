//! Inbound requests and outbound results.
//!
//! Every engine call returns one of these values instead of invoking
//! callbacks; the caller matches on them to drive presentation.

use super::types::PlayerId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Request to mark a cell for the player whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Target cell (0-8).
    pub cell_index: usize,
}

impl MoveRequest {
    /// Creates a new move request.
    #[instrument]
    pub fn new(cell_index: usize) -> Self {
        Self { cell_index }
    }
}

/// Focus-mode toggle and reset signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ControlEvent {
    /// Leave focus mode.
    Pause,
    /// Enter focus mode, starting a round if none is running.
    Resume,
    /// Start the match over.
    Reset,
}

/// Why a move request was not applied. The state is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveRejection {
    /// The match is outside focus mode.
    #[display("Match is paused")]
    Paused,

    /// No round is running.
    #[display("No player is active")]
    NoActivePlayer,

    /// The index does not name a cell.
    #[display("Cell {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),
}

impl std::error::Error for MoveRejection {}

/// Why a round could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RoundStartError {
    /// Rounds only start in focus mode.
    #[display("Match is paused")]
    Paused,

    /// A round is already running.
    #[display("Round already in progress ({} to move)", _0)]
    RoundInProgress(PlayerId),

    /// The match was won and must be reset first.
    #[display("Match already won by {}", _0)]
    MatchOver(PlayerId),
}

impl std::error::Error for RoundStartError {}

/// Cells touched by an applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDelta {
    /// Cell that received the mark.
    pub placed: usize,
    /// Cell the mark slid away from, when the player already had three.
    pub removed: Option<usize>,
}

/// What an applied move did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Outcome {
    /// Turn passed to the opponent.
    #[display("Continue")]
    Continue,
    /// Mover won the round; the board has been cleared.
    #[display("{} wins the round", _0)]
    RoundEnded(PlayerId),
    /// Mover won the match.
    #[display("{} wins the match", _0)]
    MatchEnded(PlayerId),
}

impl Outcome {
    /// Returns the winner if the move won something.
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Outcome::Continue => None,
            Outcome::RoundEnded(player) | Outcome::MatchEnded(player) => Some(*player),
        }
    }
}

/// Result of an applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Seat that moved.
    pub player: PlayerId,
    /// Cells to redraw or animate.
    pub board_delta: BoardDelta,
    /// Continue, round end or match end.
    pub outcome: Outcome,
    /// Sorted line that won the round, if any.
    pub winning_line: Option<[usize; 3]>,
}

impl MoveResult {
    /// True when scores or the round counter changed and a snapshot is due.
    pub fn requires_persist(&self) -> bool {
        self.outcome.winner().is_some()
    }
}

/// Result of a control event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlOutcome {
    /// Focus mode left; the active player is kept.
    Paused,
    /// Focus mode entered.
    Resumed {
        /// Seat to move.
        active_player: PlayerId,
        /// True when resuming had to start a new round.
        round_started: bool,
    },
    /// Match returned to its initial state.
    Reset,
    /// Already in the requested mode.
    Unchanged,
}

impl ControlOutcome {
    /// True when the event changed persisted fields.
    pub fn requires_persist(&self) -> bool {
        matches!(self, ControlOutcome::Reset)
    }
}
