//! Game engine for sliding-mark tic-tac-toe.

use super::action::{
    BoardDelta, ControlEvent, ControlOutcome, MoveRejection, MoveRequest, MoveResult, Outcome,
    RoundStartError,
};
use super::codec::{self, PartialMatchState, Snapshot};
use super::contracts::{
    Contract, HasActivePlayer, MoveContract, assert_invariants, assert_move_postconditions,
};
use super::player::PlayerProfile;
use super::rules;
use super::scheduler::TurnScheduler;
use super::{Cell, MatchConfig, MatchState, PlayerId};
use tracing::{debug, info, instrument, warn};

/// Owns one match and applies every event to it.
///
/// Each call runs to completion and returns a typed result; the engine
/// never calls back into its caller and keeps no clock. Cooldowns after a
/// round or match end belong to the caller, who can gate input on
/// [`MatchState::accepts_moves`].
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    state: MatchState,
}

impl GameEngine {
    /// Creates an engine for a fresh, paused match.
    #[instrument]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            state: MatchState::new(config),
        }
    }

    /// Seeds a fresh match with decoded snapshot progress.
    ///
    /// Profiles and the mute flag always carry over. A stored score that
    /// already reaches the threshold means the match was won and never
    /// reset, so scores and the round counter start over instead.
    #[instrument(skip(partial))]
    pub fn restore(partial: PartialMatchState, config: MatchConfig) -> Self {
        let threshold = config.max_wins_to_end_match();
        let finished = partial.scores().iter().any(|&score| score >= threshold);

        let mut state = MatchState::new(config);
        state.muted = *partial.muted();
        for id in PlayerId::ALL {
            state
                .player_mut(id)
                .set_profile(partial.profiles()[id.index()].clone());
        }

        if finished {
            info!(scores = ?partial.scores(), threshold, "Snapshot holds a finished match, starting over");
        } else {
            state.round_number = *partial.round_number();
            for id in PlayerId::ALL {
                state.player_mut(id).set_score(partial.scores()[id.index()]);
            }
            info!(round = state.round_number, "Match restored from snapshot");
        }

        assert_invariants(&state);
        Self { state }
    }

    /// Restores from a snapshot when there is a usable one, else starts fresh.
    ///
    /// A malformed snapshot is logged and discarded; it is never fatal.
    #[instrument(skip(snapshot))]
    pub fn restore_or_default(snapshot: Option<&Snapshot>, config: MatchConfig) -> Self {
        let Some(snapshot) = snapshot else {
            debug!("No snapshot, starting a fresh match");
            return Self::new(config);
        };

        match codec::deserialize(snapshot) {
            Ok(partial) => Self::restore(partial, config),
            Err(error) => {
                warn!(%error, "Discarding malformed snapshot");
                Self::new(config)
            }
        }
    }

    /// Returns the match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Captures the durable part of the match.
    pub fn snapshot(&self) -> Snapshot {
        codec::serialize(&self.state)
    }

    /// Marks `cell_index` for the seat to move. Shorthand for [`GameEngine::submit`].
    ///
    /// # Errors
    ///
    /// See [`GameEngine::submit`].
    pub fn apply_move(&mut self, cell_index: usize) -> Result<MoveResult, MoveRejection> {
        self.submit(MoveRequest::new(cell_index))
    }

    /// Applies a move request for the seat to move.
    ///
    /// With three marks already down, the oldest one slides away to the new
    /// cell. A completed line scores the round; otherwise the turn passes.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejection`] when paused, between rounds, out of bounds,
    /// or on an occupied cell. The state is unchanged in every such case.
    #[instrument(skip(self), fields(active = ?self.state.active_player, paused = self.state.paused))]
    pub fn submit(&mut self, request: MoveRequest) -> Result<MoveResult, MoveRejection> {
        MoveContract::pre(&self.state, &request)
            .inspect_err(|reason| debug!(%reason, "Move rejected"))?;
        let player = HasActivePlayer::check(&self.state)?;
        let cell_index = request.cell_index;

        let before = cfg!(debug_assertions).then(|| self.state.clone());

        let removed = if self.state.player(player).is_full() {
            let oldest = self.state.player_mut(player).pop_oldest();
            if let Some(from) = oldest {
                self.state.board.set(from, Cell::Empty);
            }
            oldest
        } else {
            None
        };
        self.state.board.set(cell_index, Cell::Mark(player));
        self.state.player_mut(player).push_cell(cell_index);
        debug!(?player, placed = cell_index, ?removed, "Mark placed");

        let winning_line = rules::winning_line(self.state.player(player).active_cells());
        let outcome = match winning_line {
            Some(line) => self.conclude_round(player, line),
            None => {
                TurnScheduler::advance_turn(&mut self.state);
                Outcome::Continue
            }
        };

        if let Some(before) = before {
            assert_move_postconditions(&before, &self.state);
        }

        Ok(MoveResult {
            player,
            board_delta: BoardDelta {
                placed: cell_index,
                removed,
            },
            outcome,
            winning_line,
        })
    }

    /// Scores a won round and decides between round end and match end.
    fn conclude_round(&mut self, winner: PlayerId, line: [usize; 3]) -> Outcome {
        let score = self.state.player_mut(winner).award_win();
        self.state.active_player = None;

        if score >= self.state.max_wins_to_end_match {
            self.state.match_winner = Some(winner);
            info!(?winner, score, ?line, "Match won");
            Outcome::MatchEnded(winner)
        } else {
            self.state.clear_round();
            self.state.round_number += 1;
            info!(?winner, score, ?line, next_round = self.state.round_number, "Round won");
            Outcome::RoundEnded(winner)
        }
    }

    /// Opens the next round, giving the first move by round parity.
    ///
    /// # Errors
    ///
    /// Returns [`RoundStartError`] when paused, when a round is running, or
    /// when the match has been won.
    #[instrument(skip(self), fields(round = self.state.round_number))]
    pub fn start_round(&mut self) -> Result<PlayerId, RoundStartError> {
        if self.state.paused {
            return Err(RoundStartError::Paused);
        }
        TurnScheduler::open_round(&mut self.state)
    }

    /// Leaves focus mode.
    pub fn pause(&mut self) -> ControlOutcome {
        TurnScheduler::pause(&mut self.state)
    }

    /// Enters focus mode, opening a round first if nobody is to move.
    ///
    /// # Errors
    ///
    /// Returns [`RoundStartError::MatchOver`] once the match has been won.
    pub fn resume(&mut self) -> Result<ControlOutcome, RoundStartError> {
        TurnScheduler::resume(&mut self.state)
    }

    /// Starts the match over: no scores, round 0, empty board, paused.
    ///
    /// Profiles and the mute preference are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> ControlOutcome {
        self.state.reset_progress();
        info!("Match reset");
        assert_invariants(&self.state);
        ControlOutcome::Reset
    }

    /// Dispatches a control event.
    ///
    /// # Errors
    ///
    /// Only `Resume` can fail, see [`GameEngine::resume`].
    #[instrument(skip(self))]
    pub fn handle_control(&mut self, event: ControlEvent) -> Result<ControlOutcome, RoundStartError> {
        match event {
            ControlEvent::Pause => Ok(self.pause()),
            ControlEvent::Resume => self.resume(),
            ControlEvent::Reset => Ok(self.reset()),
        }
    }

    /// Cells a move could target right now; empty while moves are refused.
    pub fn valid_moves(&self) -> Vec<usize> {
        if self.state.accepts_moves() {
            self.state.board.empty_cells()
        } else {
            Vec::new()
        }
    }

    /// Cell that will slide away on the active seat's next placement.
    pub fn next_slide_source(&self) -> Option<usize> {
        let player = self.state.player(self.state.active_player?);
        if player.is_full() { player.oldest() } else { None }
    }

    /// Sets the persisted sound preference. Returns true if it changed.
    #[instrument(skip(self))]
    pub fn set_muted(&mut self, muted: bool) -> bool {
        let changed = self.state.muted != muted;
        self.state.muted = muted;
        changed
    }

    /// Replaces a seat's profile.
    #[instrument(skip(self))]
    pub fn set_profile(&mut self, id: PlayerId, profile: PlayerProfile) {
        self.state.player_mut(id).set_profile(profile);
    }
}
