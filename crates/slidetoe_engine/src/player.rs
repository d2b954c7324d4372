//! Per-seat state: score, sliding queue and profile.

use super::types::PlayerId;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::instrument;

/// Maximum marks a player keeps on the board at once.
pub const MAX_ACTIVE_MARKS: usize = 3;

/// Display data carried with a seat. Game logic never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct PlayerProfile {
    /// Name shown for the seat.
    display_name: String,
    /// Brand color, e.g. `"#FC6262"`.
    color_token: String,
    /// Avatar asset reference.
    avatar_token: String,
}

impl PlayerProfile {
    /// Default profile for a seat.
    #[instrument]
    pub fn default_for(id: PlayerId) -> Self {
        match id {
            PlayerId::P1 => Self::new(
                "Player 1".to_string(),
                "#FC6262".to_string(),
                "/assets/avatars/1.svg".to_string(),
            ),
            PlayerId::P2 => Self::new(
                "Player 2".to_string(),
                "#396AEB".to_string(),
                "/assets/avatars/2.svg".to_string(),
            ),
        }
    }
}

/// Score and active marks of one seat.
///
/// `active_cells` is a FIFO: the front is the oldest mark, the one that
/// slides away when a fourth placement is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    id: PlayerId,
    score: u32,
    active_cells: VecDeque<usize>,
    profile: PlayerProfile,
}

impl PlayerState {
    /// Creates a seat with no score, no marks and the default profile.
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            score: 0,
            active_cells: VecDeque::with_capacity(MAX_ACTIVE_MARKS),
            profile: PlayerProfile::default_for(id),
        }
    }

    /// Returns the seat.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Rounds won in the current match.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Cells currently holding this player's marks, oldest first.
    pub fn active_cells(&self) -> &VecDeque<usize> {
        &self.active_cells
    }

    /// Returns the profile.
    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    /// True when the next placement slides the oldest mark.
    pub fn is_full(&self) -> bool {
        self.active_cells.len() >= MAX_ACTIVE_MARKS
    }

    /// Oldest active mark.
    pub fn oldest(&self) -> Option<usize> {
        self.active_cells.front().copied()
    }

    pub(crate) fn push_cell(&mut self, index: usize) {
        self.active_cells.push_back(index);
    }

    pub(crate) fn pop_oldest(&mut self) -> Option<usize> {
        self.active_cells.pop_front()
    }

    pub(crate) fn clear_cells(&mut self) {
        self.active_cells.clear();
    }

    /// Adds a round win and returns the new score.
    pub(crate) fn award_win(&mut self) -> u32 {
        self.score += 1;
        self.score
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub(crate) fn set_profile(&mut self, profile: PlayerProfile) {
        self.profile = profile;
    }
}
