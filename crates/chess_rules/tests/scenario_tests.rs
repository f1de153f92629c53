//! End-to-end scenarios across validation, application, evaluation,
//! notation and the history reducer.

use chess_rules::replay::{current_outcome, current_position};
use chess_rules::*;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn mv(uci: &str) -> Move {
    Move::from_uci(uci).unwrap()
}

fn white(kind: PieceKind) -> Option<Piece> {
    Some(Piece::new(Color::White, kind))
}

#[test]
fn scenario_opening_pawn_push() {
    let pos = Position::startpos();
    assert_eq!(validate(&pos, &mv("e2e4")), ValidationResult::Valid);

    let next = apply_move(&pos, &mv("e2e4")).unwrap();
    assert_eq!(next.piece_at(sq("e4")), white(PieceKind::Pawn));
    assert_eq!(next.piece_at(sq("e2")), None);
    assert_eq!(next.side_to_move, Color::Black);
}

#[test]
fn scenario_en_passant_capture() {
    let mut pos = Position::startpos();
    for uci in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        pos = apply_move(&pos, &mv(uci)).unwrap();
    }
    assert_eq!(pos.en_passant, Some(sq("d6")));
    assert_eq!(validate(&pos, &mv("e5d6")), ValidationResult::Valid);

    let next = apply_move(&pos, &mv("e5d6")).unwrap();
    assert_eq!(next.piece_at(sq("d5")), None);
    assert_eq!(next.piece_at(sq("e5")), None);
    assert_eq!(next.piece_at(sq("d6")), white(PieceKind::Pawn));
    assert_eq!(next.en_passant, None);
}

#[test]
fn scenario_en_passant_expires_after_one_move() {
    let mut pos = Position::startpos();
    for uci in ["e2e4", "a7a6", "e4e5", "d7d5", "g1f3", "a6a5"] {
        pos = apply_move(&pos, &mv(uci)).unwrap();
    }
    assert!(!validate(&pos, &mv("e5d6")).is_valid());
}

#[test]
fn scenario_queen_mate_in_corner() {
    let pos = Position::from_fen("8/8/8/8/8/1qk5/8/K7 b - - 0 1").unwrap();
    let qb2 = mv("b3b2");
    assert_eq!(validate(&pos, &qb2), ValidationResult::Valid);
    assert_eq!(move_to_san(&pos, &qb2), "Qb2#");

    let next = apply_move(&pos, &qb2).unwrap();
    assert_eq!(
        evaluate(&next, None),
        GameResult::Checkmate {
            winner: Color::Black
        }
    );
}

#[test]
fn scenario_rook_stalemate() {
    let pos = Position::from_fen("K7/1rk5/8/8/8/8/8/8 w - - 0 1").unwrap();
    assert_eq!(evaluate(&pos, None), GameResult::Stalemate);
}

#[test]
fn scenario_fifty_moves_and_threefold() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 50 40").unwrap();
    assert_eq!(
        evaluate(&pos, None),
        GameResult::Draw {
            reason: DrawReason::FiftyMoveRule
        }
    );

    let a = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let b = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 4 3").unwrap();
    let c = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 8 5").unwrap();
    assert_eq!(
        evaluate(&c, Some(&[a.clone(), b.clone(), c.clone()][..])),
        GameResult::Draw {
            reason: DrawReason::ThreefoldRepetition
        }
    );

    // Different castling rights break the chain
    let d = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 8 5").unwrap();
    assert_eq!(evaluate(&d, Some(&[a, b, d.clone()][..])), GameResult::Ongoing);
}

#[test]
fn scenario_branching_discards_future() {
    let state = ["e2e4", "e7e5", "g1f3", "b8c6"]
        .iter()
        .fold(GameHistoryState::default(), |s, u| {
            s.reduce(HistoryAction::Move(mv(u)))
        });

    let branched = state
        .reduce(HistoryAction::PreviousMove)
        .reduce(HistoryAction::PreviousMove)
        .reduce(HistoryAction::Move(mv("f1c4")));
    assert_eq!(branched.move_history.len(), 3);

    // Navigation alone cannot recover g1f3 / b8c6
    for action in [
        HistoryAction::NextMove,
        HistoryAction::JumpToMove(3),
        HistoryAction::PreviousMove,
        HistoryAction::NextMove,
    ] {
        let s = branched.reduce(action);
        assert!(!s.move_history.contains(&mv("g1f3")));
        assert!(!s.move_history.contains(&mv("b8c6")));
    }
}

#[test]
fn scenario_full_game_through_history() {
    let mut state = GameHistoryState::default();
    for uci in ["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"] {
        let pos = current_position(&state);
        let m = mv(uci);
        assert!(validate(&pos, &m).is_valid(), "{uci} should be legal");
        state = state.reduce(HistoryAction::Move(m));
    }
    let outcome = current_outcome(&state);
    assert_eq!(
        outcome,
        GameResult::Checkmate {
            winner: Color::White
        }
    );

    let text = moves_to_text(&state.move_history, Some(&outcome));
    assert_eq!(text, "1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7# 1-0 (checkmate)");
    assert_eq!(parse_kifu_text(&text).moves, state.move_history);
}
