//! Line-oriented play session.
//!
//! A [`Session`] owns the engine and a snapshot store. It turns text commands
//! into engine calls and engine results into reply lines. Timers live in the
//! binary: when a reply carries a [`Cooldown`], the caller waits it out and
//! then calls [`Session::finish_cooldown`].

use crate::config::AppConfig;
use crate::store::SnapshotStore;
use derive_more::Display;
use slidetoe_engine::{
    ControlEvent, ControlOutcome, GameEngine, MoveRequest, MoveResult, Outcome, PlayerId,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Mark a cell.
    Move(usize),
    /// Leave focus mode.
    Pause,
    /// Enter focus mode.
    Resume,
    /// Start the match over.
    Reset,
    /// Silence move sounds.
    Mute,
    /// Re-enable move sounds.
    Unmute,
    /// Print the board and scores.
    Status,
    /// End the session.
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseCommandError {
    /// Blank line.
    #[display("Empty command")]
    Empty,

    /// `move` without a usable cell number.
    #[display("Expected a cell number, got '{}'", _0)]
    BadCell(String),

    /// Anything else.
    #[display("Unknown command '{}'", _0)]
    Unknown(String),
}

impl std::error::Error for ParseCommandError {}

impl FromStr for InputCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseCommandError::Empty);
        };
        let head = head.to_ascii_lowercase();

        if let Ok(cell) = head.parse::<usize>() {
            return Ok(InputCommand::Move(cell));
        }

        match head.as_str() {
            "move" | "m" => {
                let arg = words.next().unwrap_or_default();
                arg.parse::<usize>()
                    .map(InputCommand::Move)
                    .map_err(|_| ParseCommandError::BadCell(arg.to_string()))
            }
            "pause" | "p" => Ok(InputCommand::Pause),
            "resume" | "r" => Ok(InputCommand::Resume),
            "reset" => Ok(InputCommand::Reset),
            "mute" => Ok(InputCommand::Mute),
            "unmute" => Ok(InputCommand::Unmute),
            "status" | "s" => Ok(InputCommand::Status),
            "quit" | "q" | "exit" => Ok(InputCommand::Quit),
            _ => Err(ParseCommandError::Unknown(head)),
        }
    }
}

/// A wait the driver must sit out before play continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Cooldown {
    /// After a round win; ends by starting the next round.
    Round,
    /// After a match win; ends by resetting the match.
    Match,
}

/// What the session has to say about one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Text for the player, one entry per line.
    pub lines: Vec<String>,
    /// Set when the driver must wait before taking further moves.
    pub cooldown: Option<Cooldown>,
    /// Set when the session should end.
    pub quit: bool,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            ..Self::default()
        }
    }

    fn push(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }
}

/// An engine bound to a snapshot store.
#[derive(Debug)]
pub struct Session<S: SnapshotStore> {
    engine: GameEngine,
    store: S,
    config: AppConfig,
}

impl<S: SnapshotStore> Session<S> {
    /// Restores the match from `store`, or starts fresh when nothing usable is stored.
    #[instrument(skip(store, config))]
    pub fn open(store: S, config: AppConfig) -> Self {
        let snapshot = match store.load() {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "Ignoring stored snapshot");
                None
            }
        };
        let engine = GameEngine::restore_or_default(snapshot.as_ref(), config.match_config());
        info!(
            round = engine.state().round_number(),
            "Session opened"
        );
        Self {
            engine,
            store,
            config,
        }
    }

    /// The engine driven by this session.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// How long `cooldown` lasts under the current config.
    pub fn cooldown_duration(&self, cooldown: Cooldown) -> Duration {
        match cooldown {
            Cooldown::Round => self.config.round_cooldown(),
            Cooldown::Match => self.config.match_cooldown(),
        }
    }

    /// Applies one command.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: InputCommand) -> Reply {
        match command {
            InputCommand::Move(cell) => self.handle_move(cell),
            InputCommand::Pause => self.handle_control(ControlEvent::Pause),
            InputCommand::Resume => self.handle_control(ControlEvent::Resume),
            InputCommand::Reset => self.handle_control(ControlEvent::Reset),
            InputCommand::Mute => self.handle_mute(true),
            InputCommand::Unmute => self.handle_mute(false),
            InputCommand::Status => Reply {
                lines: self.status_lines(),
                ..Reply::default()
            },
            InputCommand::Quit => Reply {
                lines: vec!["Bye.".to_string()],
                quit: true,
                ..Reply::default()
            },
        }
    }

    /// Runs the action that closes `cooldown`.
    #[instrument(skip(self))]
    pub fn finish_cooldown(&mut self, cooldown: Cooldown) -> Reply {
        match cooldown {
            Cooldown::Round => match self.engine.start_round() {
                Ok(opener) => {
                    let mut reply = Reply::line(format!(
                        "Round {} begins. {} to move.",
                        self.engine.state().round_number() + 1,
                        self.seat_label(opener)
                    ));
                    reply.lines.extend(self.board_lines());
                    reply
                }
                // Paused or reset during the wait; the next resume opens the round.
                Err(error) => {
                    debug!(%error, "Round not started after cooldown");
                    Reply::default()
                }
            },
            Cooldown::Match => {
                self.engine.reset();
                self.persist();
                Reply::line("New match. Type 'resume' to play.")
            }
        }
    }

    fn handle_move(&mut self, cell: usize) -> Reply {
        match self.engine.submit(MoveRequest::new(cell)) {
            Ok(result) => {
                if result.requires_persist() {
                    self.persist();
                }
                self.describe_move(&result)
            }
            Err(rejection) => Reply::line(format!("Move rejected: {}", rejection)),
        }
    }

    fn describe_move(&self, result: &MoveResult) -> Reply {
        let mut reply = Reply::default();
        let mover = self.seat_label(result.player);
        match result.board_delta.removed {
            Some(removed) => reply.push(format!(
                "{} slides {} -> {}",
                mover, removed, result.board_delta.placed
            )),
            None => reply.push(format!("{} takes {}", mover, result.board_delta.placed)),
        }

        match result.outcome {
            Outcome::Continue => {
                reply.lines.extend(self.board_lines());
            }
            Outcome::RoundEnded(winner) => {
                if let Some(line) = result.winning_line {
                    reply.push(format!(
                        "{} wins the round on {:?}. Next round shortly.",
                        self.seat_label(winner),
                        line
                    ));
                }
                reply.push(self.score_line());
                reply.cooldown = Some(Cooldown::Round);
            }
            Outcome::MatchEnded(winner) => {
                reply.push(format!("{} wins the match!", self.seat_label(winner)));
                reply.push(self.score_line());
                reply.cooldown = Some(Cooldown::Match);
            }
        }
        reply
    }

    fn handle_control(&mut self, event: ControlEvent) -> Reply {
        match self.engine.handle_control(event) {
            Ok(outcome) => {
                if outcome.requires_persist() {
                    self.persist();
                }
                let mut reply = match outcome {
                    ControlOutcome::Paused => Reply::line("Paused."),
                    ControlOutcome::Resumed {
                        active_player,
                        round_started,
                    } => {
                        let mut reply = Reply::default();
                        if round_started {
                            reply.push(format!(
                                "Round {} begins.",
                                self.engine.state().round_number() + 1
                            ));
                        }
                        reply.push(format!("{} to move.", self.seat_label(active_player)));
                        reply
                    }
                    ControlOutcome::Reset => Reply::line("Match reset."),
                    ControlOutcome::Unchanged => Reply::line(format!("Already {}.", self.mode())),
                };
                if matches!(outcome, ControlOutcome::Resumed { .. }) {
                    reply.lines.extend(self.board_lines());
                }
                reply
            }
            Err(error) => Reply::line(format!("Cannot {}: {}", event.to_string().to_lowercase(), error)),
        }
    }

    fn handle_mute(&mut self, muted: bool) -> Reply {
        if self.engine.set_muted(muted) {
            self.persist();
        }
        Reply::line(if muted { "Sound off." } else { "Sound on." })
    }

    /// Writes a snapshot. Storage failures are logged, never fatal.
    fn persist(&mut self) {
        let snapshot = self.engine.snapshot();
        if let Err(error) = self.store.save(&snapshot) {
            warn!(%error, "Failed to save snapshot");
        }
    }

    fn seat_label(&self, id: PlayerId) -> String {
        let profile = self.engine.state().player(id).profile();
        format!("{} ({})", profile.display_name(), id.mark())
    }

    fn mode(&self) -> &'static str {
        if self.engine.state().is_paused() {
            "paused"
        } else {
            "playing"
        }
    }

    fn score_line(&self) -> String {
        let state = self.engine.state();
        format!(
            "Score: {} {} - {} {} (first to {})",
            state.player(PlayerId::P1).profile().display_name(),
            state.player(PlayerId::P1).score(),
            state.player(PlayerId::P2).score(),
            state.player(PlayerId::P2).profile().display_name(),
            state.max_wins_to_end_match()
        )
    }

    fn board_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .engine
            .state()
            .board()
            .display()
            .lines()
            .map(str::to_string)
            .collect();
        if let Some(cell) = self.engine.next_slide_source() {
            lines.push(format!("Next placement removes {}", cell));
        }
        lines
    }

    fn status_lines(&self) -> Vec<String> {
        let state = self.engine.state();
        let mut lines = vec![
            format!(
                "Round {} ({}{})",
                state.round_number() + 1,
                self.mode(),
                if state.is_muted() { ", muted" } else { "" }
            ),
            self.score_line(),
        ];
        match (state.match_winner(), state.active_player()) {
            (Some(winner), _) => lines.push(format!("{} won the match.", self.seat_label(winner))),
            (None, Some(active)) => lines.push(format!("{} to move.", self.seat_label(active))),
            (None, None) => lines.push("Waiting for the next round.".to_string()),
        }
        lines.extend(self.board_lines());
        lines
    }
}
