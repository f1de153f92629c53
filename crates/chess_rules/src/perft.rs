use crate::apply::apply_unchecked;
use crate::board::Position;
use crate::movegen::all_legal_moves;

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = all_legal_moves(pos);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| perft(&apply_unchecked(pos, mv), depth - 1))
        .sum()
}
