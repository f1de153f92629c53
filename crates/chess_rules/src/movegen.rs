//! Legal move enumeration.
//!
//! Every candidate is run through `validate`; there is no separate generator
//! that could disagree with it.

use std::collections::BTreeSet;

use crate::board::Position;
use crate::types::*;
use crate::validate::validate;

/// Legal destinations for the piece on `from`.
///
/// Empty when `from` is empty or holds a piece of the side not to move.
pub fn legal_moves(pos: &Position, from: Square) -> BTreeSet<Square> {
    match pos.piece_at(from) {
        Some(pc) if pc.color == pos.side_to_move => Square::all()
            .filter(|&to| validate(pos, &Move::new(from, to)).is_valid())
            .collect(),
        _ => BTreeSet::new(),
    }
}

/// Every legal move of the side to move, a1 origin first.
///
/// A pawn reaching the last rank yields one move per promotion piece.
pub fn all_legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (from, pc) in pos.pieces() {
        if pc.color != pos.side_to_move {
            continue;
        }
        for to in legal_moves(pos, from) {
            if pc.kind == PieceKind::Pawn && to.rank() == pc.color.promotion_rank() {
                out.extend(
                    PieceKind::PROMOTIONS
                        .iter()
                        .map(|&kind| Move::new(from, to).with_promotion(kind)),
                );
            } else {
                out.push(Move::new(from, to));
            }
        }
    }
    out
}

/// Does the side to move have any legal move at all? Stops at the first one.
pub fn has_legal_move(pos: &Position) -> bool {
    pos.pieces()
        .filter(|(_, pc)| pc.color == pos.side_to_move)
        .any(|(from, _)| Square::all().any(|to| validate(pos, &Move::new(from, to)).is_valid()))
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
