//! Move legality.
//!
//! `validate` is the single source of truth for legality: the enumerator,
//! the evaluator and the notation codec all go through it.

use crate::apply::apply_unchecked;
use crate::attacks::{delta, is_diagonal, is_king_step, is_knight_jump, is_straight, path_clear};
use crate::board::Position;
use crate::types::*;

/// Outcome of a legality query. Reasons are for display and debugging only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(reason) => Some(reason),
        }
    }
}

fn invalid(reason: &str) -> ValidationResult {
    ValidationResult::Invalid(reason.to_string())
}

/// Decide whether `mv` is legal in `pos`.
///
/// Checks run in a fixed order and stop at the first failure: occupancy of
/// the source, turn, own-piece destination, piece geometry, and finally a
/// simulated move to confirm the mover's king is not left in check.
pub fn validate(pos: &Position, mv: &Move) -> ValidationResult {
    let Some(piece) = pos.piece_at(mv.from) else {
        return invalid("empty square");
    };
    if piece.color != pos.side_to_move {
        return invalid("wrong turn");
    }
    if pos.piece_at(mv.to).is_some_and(|target| target.color == piece.color) {
        return invalid("own piece");
    }
    if let Err(reason) = check_geometry(pos, mv, piece) {
        return invalid(reason);
    }

    let next = apply_unchecked(pos, mv);
    if next.in_check(piece.color) {
        return invalid("own king in check");
    }
    ValidationResult::Valid
}

fn check_geometry(pos: &Position, mv: &Move, piece: Piece) -> Result<(), &'static str> {
    let (from, to) = (mv.from, mv.to);
    match piece.kind {
        PieceKind::Pawn => {
            pawn_geometry(pos, from, to, piece.color)?;
            if to.rank() == piece.color.promotion_rank()
                && matches!(mv.promotion, Some(PieceKind::Pawn | PieceKind::King))
            {
                return Err("invalid promotion piece");
            }
            Ok(())
        }
        PieceKind::Knight => {
            if is_knight_jump(from, to) {
                Ok(())
            } else {
                Err("knight cannot move there")
            }
        }
        PieceKind::Bishop => slide(pos, from, to, is_diagonal(from, to), "bishop moves diagonally"),
        PieceKind::Rook => slide(pos, from, to, is_straight(from, to), "rook moves in straight lines"),
        PieceKind::Queen => slide(
            pos,
            from,
            to,
            is_diagonal(from, to) || is_straight(from, to),
            "queen moves in lines or diagonals",
        ),
        PieceKind::King => {
            let (df, dr) = delta(from, to);
            if is_king_step(from, to) {
                Ok(())
            } else if dr == 0 && df.abs() == 2 {
                castling_geometry(pos, from, to, piece.color)
            } else {
                Err("king moves one square")
            }
        }
    }
}

fn slide(
    pos: &Position,
    from: Square,
    to: Square,
    on_line: bool,
    off_line: &'static str,
) -> Result<(), &'static str> {
    if !on_line {
        return Err(off_line);
    }
    if !path_clear(pos, from, to) {
        return Err("path blocked");
    }
    Ok(())
}

fn pawn_geometry(pos: &Position, from: Square, to: Square, c: Color) -> Result<(), &'static str> {
    let dir = c.pawn_dir();
    let (df, dr) = delta(from, to);

    if df == 0 {
        // Forward moves never capture
        if pos.piece_at(to).is_some() {
            return Err("pawn cannot capture forward");
        }
        if dr == dir {
            return Ok(());
        }
        if dr == 2 * dir && from.rank() == c.pawn_start_rank() {
            return match from.offset(0, dir) {
                Some(mid) if pos.piece_at(mid).is_none() => Ok(()),
                _ => Err("pawn path blocked"),
            };
        }
        return Err("pawn cannot move there");
    }

    if df.abs() == 1 && dr == dir {
        if pos.piece_at(to).is_some() {
            // own pieces were already rejected
            return Ok(());
        }
        if pos.en_passant == Some(to) {
            let victim = Square::new(to.file(), from.rank()).and_then(|s| pos.piece_at(s));
            if victim == Some(Piece::new(c.other(), PieceKind::Pawn)) {
                return Ok(());
            }
        }
        return Err("pawn captures diagonally only");
    }

    Err("pawn cannot move there")
}

fn castling_geometry(pos: &Position, from: Square, to: Square, c: Color) -> Result<(), &'static str> {
    let back = c.back_rank() as u8;
    let king_side = to.file() > from.file();

    if from != Square::from_coords(4, back) || !pos.castling.has(c, king_side) {
        return Err("castling not allowed");
    }
    let rook_sq = Square::from_coords(if king_side { 7 } else { 0 }, back);
    if pos.piece_at(rook_sq) != Some(Piece::new(c, PieceKind::Rook)) {
        return Err("castling not allowed");
    }
    // Covers the destination too: it lies between king and rook.
    if !path_clear(pos, from, rook_sq) {
        return Err("castling path blocked");
    }

    if pos.in_check(c) {
        return Err("cannot castle out of check");
    }
    let transit = Square::from_coords(if king_side { 5 } else { 3 }, back);
    if !king_safe_on(pos, from, transit, c) {
        return Err("cannot castle through check");
    }
    if !king_safe_on(pos, from, to, c) {
        return Err("cannot castle into check");
    }
    Ok(())
}

/// Place the king from `from` on `sq` alone and ask whether it is attacked there.
fn king_safe_on(pos: &Position, from: Square, sq: Square, c: Color) -> bool {
    let mut probe = pos.clone();
    let king = probe.piece_at(from);
    probe.set_piece(from, None);
    probe.set_piece(sq, king);
    !probe.is_square_attacked(sq, c.other())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod validate_tests;
