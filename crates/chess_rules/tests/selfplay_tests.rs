//! Seeded random self-play: invariants that must hold in every reachable
//! position, plus a notation round trip of each game.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use chess_rules::*;

const GAMES: u64 = 12;
const MAX_PLIES: usize = 160;

fn king_count(pos: &Position, color: Color) -> usize {
    pos.pieces()
        .filter(|(_, pc)| *pc == Piece::new(color, PieceKind::King))
        .count()
}

/// Play one random game, checking per-ply invariants, and return its moves.
fn random_game(seed: u64) -> Vec<Move> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = Position::startpos();
    let mut moves = Vec::new();

    for _ in 0..MAX_PLIES {
        let legal = all_legal_moves(&pos);
        let Some(mv) = legal.choose(&mut rng).cloned() else {
            break;
        };
        assert_eq!(validate(&pos, &mv), ValidationResult::Valid);

        let next = apply_move(&pos, &mv).unwrap();
        assert_eq!(next.side_to_move, pos.side_to_move.other());
        assert!(!next.in_check(pos.side_to_move), "{mv} left the mover in check");
        assert!(next.castling.is_subset_of(&pos.castling), "castling rights grew");
        assert_eq!(king_count(&next, Color::White), 1);
        assert_eq!(king_count(&next, Color::Black), 1);

        moves.push(mv);
        pos = next;
        if evaluate(&pos, None).is_over() {
            break;
        }
    }
    moves
}

#[test]
fn selfplay_invariants_hold() {
    for seed in 0..GAMES {
        let moves = random_game(seed);
        assert!(!moves.is_empty(), "seed {seed} produced no moves");
    }
}

#[test]
fn selfplay_notation_round_trip() {
    for seed in 0..GAMES {
        let moves = random_game(seed);
        let text = moves_to_text(&moves, None);
        let parsed = parse_kifu_text(&text).moves;

        assert_eq!(parsed.len(), moves.len(), "seed {seed}: {text}");
        for (ply, (a, b)) in moves.iter().zip(&parsed).enumerate() {
            assert!(a.same_move(b), "seed {seed} ply {ply}: {a} vs {b} in {text}");
        }
    }
}

#[test]
fn selfplay_enumeration_matches_occupancy() {
    let moves = random_game(99);
    let mut pos = Position::startpos();
    for mv in &moves {
        for sq in Square::all() {
            let targets = legal_moves(&pos, sq);
            let own = pos
                .piece_at(sq)
                .is_some_and(|pc| pc.color == pos.side_to_move);
            if !own {
                assert!(targets.is_empty());
            }
            for to in targets {
                assert!(validate(&pos, &Move::new(sq, to)).is_valid());
            }
        }
        pos = apply_move(&pos, mv).unwrap();
    }
}
