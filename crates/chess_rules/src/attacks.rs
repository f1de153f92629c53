//! Attack detection and the piece geometry it shares with the validator.
//!
//! Attack queries only ask whether a piece can *geometrically* reach a square
//! (movement pattern plus line-of-sight). They never look at check-safety,
//! which keeps the validator's simulation from recursing.

use crate::board::Position;
use crate::types::*;

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// File and rank distance from `from` to `to`.
#[inline]
pub(crate) fn delta(from: Square, to: Square) -> (i8, i8) {
    (to.file() - from.file(), to.rank() - from.rank())
}

#[inline]
pub(crate) fn is_knight_jump(from: Square, to: Square) -> bool {
    let (df, dr) = delta(from, to);
    KNIGHT_DELTAS.contains(&(df, dr))
}

#[inline]
pub(crate) fn is_king_step(from: Square, to: Square) -> bool {
    let (df, dr) = delta(from, to);
    from != to && df.abs() <= 1 && dr.abs() <= 1
}

#[inline]
pub(crate) fn is_diagonal(from: Square, to: Square) -> bool {
    let (df, dr) = delta(from, to);
    df != 0 && df.abs() == dr.abs()
}

#[inline]
pub(crate) fn is_straight(from: Square, to: Square) -> bool {
    let (df, dr) = delta(from, to);
    (df == 0) != (dr == 0)
}

/// Every square strictly between `from` and `to` is empty.
/// Only meaningful for squares on a shared line or diagonal.
pub(crate) fn path_clear(pos: &Position, from: Square, to: Square) -> bool {
    let (df, dr) = delta(from, to);
    let (sf, sr) = (df.signum(), dr.signum());
    let mut cur = from.offset(sf, sr);
    while let Some(s) = cur {
        if s == to {
            return true;
        }
        if pos.piece_at(s).is_some() {
            return false;
        }
        cur = s.offset(sf, sr);
    }
    false
}

/// Can `piece`, standing on `from`, reach `to` by its own movement pattern?
/// Pawns count only their capturing diagonals; castling is never an attack.
pub fn attacks_square(pos: &Position, from: Square, piece: Piece, to: Square) -> bool {
    match piece.kind {
        PieceKind::Pawn => {
            let (df, dr) = delta(from, to);
            df.abs() == 1 && dr == piece.color.pawn_dir()
        }
        PieceKind::Knight => is_knight_jump(from, to),
        PieceKind::Bishop => is_diagonal(from, to) && path_clear(pos, from, to),
        PieceKind::Rook => is_straight(from, to) && path_clear(pos, from, to),
        PieceKind::Queen => {
            (is_diagonal(from, to) || is_straight(from, to)) && path_clear(pos, from, to)
        }
        PieceKind::King => is_king_step(from, to),
    }
}

impl Position {
    /// Is `target` reached by any piece of color `by`?
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        self.pieces()
            .filter(|(_, pc)| pc.color == by)
            .any(|(from, pc)| attacks_square(self, from, pc, target))
    }

    pub fn in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
