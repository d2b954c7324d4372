//! Sliding-mark tic-tac-toe engine.
//!
//! Two seats take turns marking a 3x3 board, but each keeps at most three
//! marks: placing a fourth slides the seat's oldest mark to the new cell.
//! Three marks in a line win the round; the first seat to
//! `max_wins_to_end_match` round wins takes the match.
//!
//! # Architecture
//!
//! - **GameEngine**: owns the [`MatchState`], applies moves, scores rounds
//! - **TurnScheduler**: turn order and the pause ("focus mode") gate
//! - **codec**: durable [`Snapshot`]s for a storage collaborator
//! - **contracts / invariants**: move preconditions and debug-build checks
//!
//! # Example
//!
//! ```
//! use slidetoe_engine::{GameEngine, MatchConfig, Outcome};
//!
//! let mut engine = GameEngine::new(MatchConfig::default());
//! engine.resume().expect("fresh match can start");
//!
//! // P1 takes the top row while P2 plays elsewhere.
//! for cell in [0, 3, 1, 4] {
//!     engine.apply_move(cell).expect("legal move");
//! }
//! let result = engine.apply_move(2).expect("legal move");
//! assert!(matches!(result.outcome, Outcome::RoundEnded(_)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod engine;
mod player;
mod scheduler;
mod state;
mod types;

pub mod codec;
pub mod contracts;
pub mod invariants;
pub mod rules;

pub use action::{
    BoardDelta, ControlEvent, ControlOutcome, MoveRejection, MoveRequest, MoveResult, Outcome,
    RoundStartError,
};
pub use codec::{MalformedSnapshot, PartialMatchState, PlayerRecord, Snapshot};
pub use engine::GameEngine;
pub use player::{MAX_ACTIVE_MARKS, PlayerProfile, PlayerState};
pub use scheduler::TurnScheduler;
pub use state::{DEFAULT_MAX_WINS, MatchConfig, MatchState};
pub use types::{Board, CELL_COUNT, Cell, PlayerId};
