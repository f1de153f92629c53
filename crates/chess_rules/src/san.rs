//! Standard Algebraic Notation for a single move.

use crate::apply::apply_unchecked;
use crate::board::Position;
use crate::movegen::{has_legal_move, legal_moves};
use crate::types::*;
use crate::validate::validate;

/// Render `mv` as SAN relative to `pos`.
///
/// If the move cannot legally be played in `pos` the check suffix is left
/// off instead of failing; everything else is still derived from the board.
pub fn move_to_san(pos: &Position, mv: &Move) -> String {
    let Some(piece) = pos.piece_at(mv.from) else {
        return mv.to_uci();
    };

    let mut san = String::with_capacity(8);
    let (df, dr) = (mv.to.file() - mv.from.file(), mv.to.rank() - mv.from.rank());

    if piece.kind == PieceKind::King && dr == 0 && df.abs() == 2 {
        san.push_str(if df > 0 { "O-O" } else { "O-O-O" });
    } else if piece.kind == PieceKind::Pawn {
        let en_passant = pos.en_passant == Some(mv.to) && df != 0;
        if pos.piece_at(mv.to).is_some() || en_passant {
            san.push(mv.from.file_char());
            san.push('x');
        }
        san.push_str(&mv.to.to_string());
        if mv.to.rank() == piece.color.promotion_rank() {
            let promo = mv.promotion.unwrap_or(PieceKind::Queen);
            san.push('=');
            san.push(promo.san_letter().unwrap_or('Q'));
        }
    } else {
        san.push(piece.kind.san_letter().unwrap_or('?'));
        san.push_str(&disambiguation(pos, mv, piece));
        if pos.piece_at(mv.to).is_some() {
            san.push('x');
        }
        san.push_str(&mv.to.to_string());
    }

    if validate(pos, mv).is_valid() {
        let next = apply_unchecked(pos, mv);
        if next.in_check(next.side_to_move) {
            san.push(if has_legal_move(&next) { '+' } else { '#' });
        }
    }
    san
}

/// File, rank, both or nothing: the least that tells the mover apart from
/// same-kind pieces that can also legally reach the destination.
fn disambiguation(pos: &Position, mv: &Move, piece: Piece) -> String {
    let rivals: Vec<Square> = pos
        .pieces()
        .filter(|&(sq, pc)| sq != mv.from && pc == piece)
        .filter(|&(sq, _)| legal_moves(pos, sq).contains(&mv.to))
        .map(|(sq, _)| sq)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|s| s.file() != mv.from.file()) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|s| s.rank() != mv.from.rank()) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
