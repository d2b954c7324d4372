//! Tests for the match lifecycle: rounds, scoring, focus mode and reset.

use slidetoe_engine::{
    BoardDelta, Cell, ControlEvent, ControlOutcome, GameEngine, MatchConfig, MoveRejection,
    MoveRequest, Outcome, PlayerId, RoundStartError,
};

fn running() -> GameEngine {
    let mut engine = GameEngine::new(MatchConfig::default());
    engine.resume().expect("fresh match resumes");
    engine
}

/// Plays one round that `winner` takes on the top row. Returns the final move's outcome.
fn win_round(engine: &mut GameEngine, winner: PlayerId) -> Outcome {
    let opener = engine.state().active_player().expect("round in progress");
    let moves: &[usize] = if opener == winner {
        &[0, 3, 1, 4, 2]
    } else {
        &[3, 0, 4, 1, 8, 2]
    };

    let mut last = Outcome::Continue;
    for &cell in moves {
        last = engine.apply_move(cell).expect("legal move").outcome;
    }
    last
}

#[test]
fn test_fresh_match_is_paused_without_active_player() {
    let engine = GameEngine::new(MatchConfig::default());
    let state = engine.state();
    assert!(state.is_paused());
    assert_eq!(state.active_player(), None);
    assert_eq!(state.round_number(), 0);
    assert_eq!(state.max_wins_to_end_match(), 3);
}

#[test]
fn test_direct_placement_then_turn_passes() {
    let mut engine = running();
    let result = engine.apply_move(4).expect("legal move");

    assert_eq!(result.player, PlayerId::P1);
    assert_eq!(
        result.board_delta,
        BoardDelta {
            placed: 4,
            removed: None
        }
    );
    assert_eq!(result.outcome, Outcome::Continue);
    assert_eq!(result.winning_line, None);
    assert!(!result.requires_persist());
    assert_eq!(engine.state().board().get(4), Some(Cell::Mark(PlayerId::P1)));
    assert_eq!(engine.state().active_player(), Some(PlayerId::P2));
}

#[test]
fn test_fourth_mark_slides_oldest() {
    let mut engine = running();
    // P1: 0, 8, 5 / P2: 1, 3, 6
    for cell in [0, 1, 8, 3, 5, 6] {
        engine.apply_move(cell).expect("legal move");
    }

    let result = engine.apply_move(7).expect("legal move");
    assert_eq!(result.board_delta.removed, Some(0));
    assert_eq!(engine.state().board().get(0), Some(Cell::Empty));
    assert_eq!(engine.state().board().count_marks(PlayerId::P1), 3);

    // P2 slides its own oldest.
    let result = engine.apply_move(2).expect("legal move");
    assert_eq!(result.outcome, Outcome::Continue);
    assert_eq!(result.board_delta.removed, Some(1));
    assert_eq!(engine.state().board().get(1), Some(Cell::Empty));
    assert_eq!(engine.state().board().get(2), Some(Cell::Mark(PlayerId::P2)));
}

#[test]
fn test_sliding_into_line_wins() {
    let mut engine = running();
    // P1: 0, 1, 6 / P2: 3, 4, 8
    for cell in [0, 3, 1, 4, 6, 8] {
        engine.apply_move(cell).expect("legal move");
    }

    // P1 slides 0 away to 2: {1, 2, 6} is no line yet.
    assert_eq!(engine.apply_move(2).unwrap().outcome, Outcome::Continue);
    // P2 slides 3 away to 5: {4, 5, 8} is no line.
    assert_eq!(engine.apply_move(5).unwrap().outcome, Outcome::Continue);
    // P1 slides 1 away to 4? Occupied by P2.
    assert_eq!(engine.apply_move(4), Err(MoveRejection::CellOccupied(4)));
    // P1 slides 1 away to 0: {0, 2, 6} is no line.
    assert_eq!(engine.apply_move(0).unwrap().outcome, Outcome::Continue);
    // P2 slides 4 away to 3: {3, 5, 8} is no line.
    assert_eq!(engine.apply_move(3).unwrap().outcome, Outcome::Continue);
    // P1 slides 6 away to 1: {0, 1, 2} completes the top row.
    let result = engine.apply_move(1).expect("legal move");
    assert_eq!(result.board_delta.removed, Some(6));
    assert_eq!(result.outcome, Outcome::RoundEnded(PlayerId::P1));
    assert_eq!(result.winning_line, Some([0, 1, 2]));
}

#[test]
fn test_round_end_clears_board_and_keeps_score() {
    let mut engine = running();
    let outcome = win_round(&mut engine, PlayerId::P1);
    assert_eq!(outcome, Outcome::RoundEnded(PlayerId::P1));

    let state = engine.state();
    assert!(state.board().cells().iter().all(|&c| c == Cell::Empty));
    assert!(state.player(PlayerId::P1).active_cells().is_empty());
    assert!(state.player(PlayerId::P2).active_cells().is_empty());
    assert_eq!(state.player(PlayerId::P1).score(), 1);
    assert_eq!(state.player(PlayerId::P2).score(), 0);
    assert_eq!(state.round_number(), 1);
    assert_eq!(state.active_player(), None);
    assert!(!state.accepts_moves());
}

#[test]
fn test_winning_move_does_not_advance_turn() {
    let mut engine = running();
    win_round(&mut engine, PlayerId::P1);
    assert_eq!(engine.state().active_player(), None);
    assert_eq!(
        engine.apply_move(4),
        Err(MoveRejection::NoActivePlayer)
    );
}

#[test]
fn test_next_round_opener_alternates() {
    let mut engine = running();
    assert_eq!(engine.state().active_player(), Some(PlayerId::P1));

    win_round(&mut engine, PlayerId::P2);
    assert_eq!(engine.state().round_number(), 1);
    assert_eq!(engine.start_round(), Ok(PlayerId::P2));

    win_round(&mut engine, PlayerId::P2);
    assert_eq!(engine.start_round(), Ok(PlayerId::P1));
}

#[test]
fn test_start_round_refused_while_round_runs() {
    let mut engine = running();
    assert_eq!(
        engine.start_round(),
        Err(RoundStartError::RoundInProgress(PlayerId::P1))
    );
}

#[test]
fn test_third_win_ends_match() {
    let mut engine = running();
    assert_eq!(win_round(&mut engine, PlayerId::P1), Outcome::RoundEnded(PlayerId::P1));
    engine.start_round().expect("round opens");
    assert_eq!(win_round(&mut engine, PlayerId::P1), Outcome::RoundEnded(PlayerId::P1));
    engine.start_round().expect("round opens");
    assert_eq!(win_round(&mut engine, PlayerId::P1), Outcome::MatchEnded(PlayerId::P1));

    let state = engine.state();
    assert_eq!(state.player(PlayerId::P1).score(), 3);
    assert_eq!(state.match_winner(), Some(PlayerId::P1));
    assert_eq!(state.active_player(), None);
    assert_eq!(state.round_number(), 2);
    assert_eq!(
        engine.start_round(),
        Err(RoundStartError::MatchOver(PlayerId::P1))
    );

    assert_eq!(engine.reset(), ControlOutcome::Reset);
    let state = engine.state();
    assert_eq!(state.player(PlayerId::P1).score(), 0);
    assert_eq!(state.player(PlayerId::P2).score(), 0);
    assert_eq!(state.round_number(), 0);
    assert_eq!(state.match_winner(), None);
    assert!(state.is_paused());
    assert!(state.board().cells().iter().all(|&c| c == Cell::Empty));
}

#[test]
fn test_custom_threshold_ends_match_early() {
    let mut engine = GameEngine::new(MatchConfig::new(1));
    engine.resume().expect("fresh match resumes");
    let result_outcome = win_round(&mut engine, PlayerId::P1);
    assert_eq!(result_outcome, Outcome::MatchEnded(PlayerId::P1));
}

#[test]
fn test_paused_match_rejects_every_move() {
    let mut engine = running();
    engine.apply_move(4).expect("legal move");
    assert_eq!(engine.pause(), ControlOutcome::Paused);

    for cell in [0, 4, 9, 100] {
        assert_eq!(engine.apply_move(cell), Err(MoveRejection::Paused));
    }
}

#[test]
fn test_resume_restores_pre_pause_position() {
    let mut engine = running();
    engine.apply_move(4).expect("legal move");
    let board = engine.state().board().clone();

    engine.pause();
    assert_eq!(
        engine.resume(),
        Ok(ControlOutcome::Resumed {
            active_player: PlayerId::P2,
            round_started: false,
        })
    );
    assert_eq!(engine.state().board(), &board);
    assert_eq!(engine.state().active_player(), Some(PlayerId::P2));
}

#[test]
fn test_resume_between_rounds_starts_round_by_parity() {
    let mut engine = running();
    win_round(&mut engine, PlayerId::P1);
    engine.pause();

    assert_eq!(
        engine.handle_control(ControlEvent::Resume),
        Ok(ControlOutcome::Resumed {
            active_player: PlayerId::P2,
            round_started: true,
        })
    );
}

#[test]
fn test_reset_is_always_accepted() {
    let mut engine = running();
    engine.apply_move(0).expect("legal move");
    assert_eq!(
        engine.handle_control(ControlEvent::Reset),
        Ok(ControlOutcome::Reset)
    );
    assert!(ControlOutcome::Reset.requires_persist());
    assert_eq!(engine.state().active_player(), None);
    assert_eq!(engine.apply_move(0), Err(MoveRejection::Paused));

    assert_eq!(engine.handle_control(ControlEvent::Reset), Ok(ControlOutcome::Reset));
}

#[test]
fn test_reset_keeps_profiles_and_mute() {
    let mut engine = running();
    engine.set_muted(true);
    engine.reset();
    assert!(engine.state().is_muted());
    assert_eq!(
        engine.state().player(PlayerId::P1).profile().display_name(),
        "Player 1"
    );
}

#[test]
fn test_round_end_requires_persist() {
    let mut engine = running();
    for cell in [0, 3, 1, 4] {
        assert!(!engine.apply_move(cell).unwrap().requires_persist());
    }
    assert!(engine.apply_move(2).unwrap().requires_persist());
}

#[test]
fn test_submit_request_matches_apply_move() {
    let mut engine = running();
    let result = engine.submit(MoveRequest::new(6)).expect("legal move");
    assert_eq!(result.player, PlayerId::P1);
    assert_eq!(result.board_delta.placed, 6);
    assert_eq!(
        engine.submit(MoveRequest::new(6)),
        Err(MoveRejection::CellOccupied(6))
    );
    assert_eq!(
        engine.submit(MoveRequest::new(9)),
        Err(MoveRejection::OutOfBounds(9))
    );
}
