//! Authoritative match state.

use super::player::PlayerState;
use super::types::{Board, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Round wins needed to take the match unless configured otherwise.
pub const DEFAULT_MAX_WINS: u32 = 3;

/// Match-level settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Round wins that end the match. Never below 1.
    #[serde(default = "default_max_wins")]
    max_wins_to_end_match: u32,
}

fn default_max_wins() -> u32 {
    DEFAULT_MAX_WINS
}

impl MatchConfig {
    /// Creates a config; a threshold of 0 is raised to 1.
    #[instrument]
    pub fn new(max_wins_to_end_match: u32) -> Self {
        Self {
            max_wins_to_end_match: max_wins_to_end_match.max(1),
        }
    }

    /// Round wins that end the match.
    pub fn max_wins_to_end_match(&self) -> u32 {
        self.max_wins_to_end_match
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WINS)
    }
}

/// Everything the engine knows about a match.
///
/// Created once per match. The board and the sliding queues are cleared at
/// every round end; scores and the round counter survive until reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub(crate) board: Board,
    pub(crate) players: [PlayerState; 2],
    pub(crate) active_player: Option<PlayerId>,
    pub(crate) round_number: u32,
    pub(crate) paused: bool,
    pub(crate) muted: bool,
    pub(crate) max_wins_to_end_match: u32,
    pub(crate) match_winner: Option<PlayerId>,
}

impl MatchState {
    /// Fresh match: round 0, no scores, paused, nobody to move.
    #[instrument]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            board: Board::new(),
            players: [PlayerState::new(PlayerId::P1), PlayerState::new(PlayerId::P2)],
            active_player: None,
            round_number: 0,
            paused: true,
            muted: false,
            max_wins_to_end_match: config.max_wins_to_end_match(),
            match_winner: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns one seat's state.
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    /// Returns both seats in seat order.
    pub fn players(&self) -> &[PlayerState; 2] {
        &self.players
    }

    /// Seat to move, `None` between rounds.
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active_player
    }

    /// Completed rounds since the last reset.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// True outside focus mode.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Persisted sound preference.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Round wins that end the match.
    pub fn max_wins_to_end_match(&self) -> u32 {
        self.max_wins_to_end_match
    }

    /// Winner of a finished match awaiting reset.
    pub fn match_winner(&self) -> Option<PlayerId> {
        self.match_winner
    }

    /// True when a move request could be applied.
    pub fn accepts_moves(&self) -> bool {
        !self.paused && self.active_player.is_some()
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id.index()]
    }

    /// Clears the board and both sliding queues.
    pub(crate) fn clear_round(&mut self) {
        self.board.clear();
        for player in &mut self.players {
            player.clear_cells();
        }
    }

    /// Back to a fresh match, keeping profiles, mute preference and threshold.
    pub(crate) fn reset_progress(&mut self) {
        self.clear_round();
        for player in &mut self.players {
            player.set_score(0);
        }
        self.active_player = None;
        self.round_number = 0;
        self.paused = true;
        self.match_winner = None;
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}
