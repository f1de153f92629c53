//! Rebuilding board state from a `GameHistoryState`.

use tracing::warn;

use crate::apply::apply_move;
use crate::board::Position;
use crate::history::GameHistoryState;
use crate::outcome::{GameResult, evaluate};
use crate::san::move_to_san;
use crate::types::Move;

/// The start position followed by the position after each move.
///
/// A stored move that is not legal where it is replayed ends the replay;
/// the positions before it are still returned.
pub fn replay_positions(moves: &[Move]) -> Vec<Position> {
    let mut out = Vec::with_capacity(moves.len() + 1);
    let mut pos = Position::startpos();
    for (ply, mv) in moves.iter().enumerate() {
        match apply_move(&pos, mv) {
            Ok(next) => {
                out.push(std::mem::replace(&mut pos, next));
            }
            Err(err) => {
                warn!(ply, %err, "replay stopped at illegal stored move");
                break;
            }
        }
    }
    out.push(pos);
    out
}

/// Positions from the start up to and including the one at the cursor.
pub fn positions(state: &GameHistoryState) -> Vec<Position> {
    replay_positions(state.moves_to_cursor())
}

/// The board the cursor points at.
pub fn current_position(state: &GameHistoryState) -> Position {
    positions(state).pop().unwrap_or_default()
}

/// SAN for every replayable move in the history, regardless of the cursor.
pub fn san_list(moves: &[Move]) -> Vec<String> {
    let positions = replay_positions(moves);
    positions
        .iter()
        .zip(moves)
        .take(positions.len() - 1)
        .map(|(pos, mv)| move_to_san(pos, mv))
        .collect()
}

/// Effective result at the cursor. A recorded result (agreement,
/// resignation) wins over anything read off the board.
pub fn current_outcome(state: &GameHistoryState) -> GameResult {
    if state.game_result.is_over() {
        return state.game_result;
    }
    let history = positions(state);
    match history.last() {
        Some(pos) => evaluate(pos, Some(history.as_slice())),
        None => GameResult::Ongoing,
    }
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod replay_tests;
