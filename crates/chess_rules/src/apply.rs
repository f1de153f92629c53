//! Producing the successor position of a move.

use crate::board::Position;
use crate::error::RulesError;
use crate::types::*;
use crate::validate::{ValidationResult, validate};

/// Validate `mv` and return the position after it.
///
/// Handing this an illegal move is a caller bug (validation was skipped), so
/// it is reported as a hard `RulesError::IllegalMove` rather than a
/// `ValidationResult`.
pub fn apply_move(pos: &Position, mv: &Move) -> Result<Position, RulesError> {
    match validate(pos, mv) {
        ValidationResult::Valid => Ok(apply_unchecked(pos, mv)),
        ValidationResult::Invalid(reason) => Err(RulesError::IllegalMove {
            mv: mv.to_uci(),
            reason,
        }),
    }
}

/// Apply without validating. The validator uses this for its check-safety
/// simulation, so it must not call back into `validate`.
pub(crate) fn apply_unchecked(pos: &Position, mv: &Move) -> Position {
    let mut next = pos.clone();
    let (from, to) = (mv.from, mv.to);
    let Some(moved) = pos.piece_at(from) else {
        return next;
    };
    let mut captured = pos.piece_at(to);

    next.en_passant = None;

    // En passant: the victim sits beside `from`, on `to`'s file
    if moved.kind == PieceKind::Pawn
        && pos.en_passant == Some(to)
        && from.file() != to.file()
        && captured.is_none()
    {
        if let Some(cs) = Square::new(to.file(), from.rank()) {
            captured = next.piece_at(cs);
            next.set_piece(cs, None);
        }
    }

    // Castling rook
    if moved.kind == PieceKind::King && from.rank() == to.rank() && (to.file() - from.file()).abs() == 2 {
        let rank = from.rank() as u8;
        let (rook_from, rook_to) = if to.file() > from.file() {
            (Square::from_coords(7, rank), Square::from_coords(5, rank))
        } else {
            (Square::from_coords(0, rank), Square::from_coords(3, rank))
        };
        if let Some(rook) = next.piece_at(rook_from)
            && rook == Piece::new(moved.color, PieceKind::Rook)
        {
            next.set_piece(rook_from, None);
            next.set_piece(rook_to, Some(rook));
        }
    }

    // Promotion defaults to a queen when the move does not name a piece.
    let placed = if moved.kind == PieceKind::Pawn && to.rank() == moved.color.promotion_rank() {
        Piece::new(moved.color, mv.promotion.unwrap_or(PieceKind::Queen))
    } else {
        moved
    };
    next.set_piece(from, None);
    next.set_piece(to, Some(placed));

    // Castling rights only ever shrink
    match moved.kind {
        PieceKind::King => next.castling.revoke_all(moved.color),
        PieceKind::Rook => {
            if let Some(king_side) = home_corner(from, moved.color) {
                next.castling.revoke(moved.color, king_side);
            }
        }
        _ => {}
    }
    if let Some(cp) = captured
        && cp.kind == PieceKind::Rook
        && let Some(king_side) = home_corner(to, cp.color)
    {
        next.castling.revoke(cp.color, king_side);
    }

    // Double pawn push sets the en-passant target to the skipped square
    if moved.kind == PieceKind::Pawn && (to.rank() - from.rank()).abs() == 2 {
        next.en_passant = Square::new(from.file(), (from.rank() + to.rank()) / 2);
    }

    next.halfmove_clock = if moved.kind == PieceKind::Pawn || captured.is_some() {
        0
    } else {
        pos.halfmove_clock.saturating_add(1)
    };

    if pos.side_to_move == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }
    next.side_to_move = pos.side_to_move.other();

    next
}

/// `Some(king_side)` when `sq` is one of `color`'s original rook squares.
fn home_corner(sq: Square, color: Color) -> Option<bool> {
    if sq.rank() != color.back_rank() {
        return None;
    }
    match sq.file() {
        0 => Some(false),
        7 => Some(true),
        _ => None,
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod apply_tests;
