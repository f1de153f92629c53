//! Terminal-state detection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::movegen::has_legal_move;
use crate::types::Color;

/// Half-move clock value at which the 50-move rule draws the game.
pub const FIFTY_MOVE_CLOCK: u32 = 50;

/// Occurrences of one position that make a repetition draw.
pub const REPETITION_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawReason {
    #[serde(rename = "threefold repetition")]
    ThreefoldRepetition,
    #[serde(rename = "50-move rule")]
    FiftyMoveRule,
    #[serde(rename = "agreed")]
    Agreed,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::FiftyMoveRule => "50-move rule",
            DrawReason::Agreed => "agreed",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameResult {
    #[default]
    Ongoing,
    Checkmate {
        winner: Color,
    },
    Stalemate,
    Draw {
        reason: DrawReason,
    },
    Resignation {
        winner: Color,
    },
}

impl GameResult {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameResult::Ongoing)
    }

    /// The side that won, if the game was decided.
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::Checkmate { winner } | GameResult::Resignation { winner } => Some(*winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Ongoing => write!(f, "ongoing"),
            GameResult::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameResult::Stalemate => write!(f, "stalemate"),
            GameResult::Draw { reason } => write!(f, "draw ({reason})"),
            GameResult::Resignation { winner } => write!(f, "resignation, {winner} wins"),
        }
    }
}

/// Decide whether the game is over in `pos`.
///
/// `history`, when supplied, is the positions of the game so far and is only
/// used for repetition counting. It may end with `pos` itself or stop just
/// before it; either way `pos` is counted once.
pub fn evaluate(pos: &Position, history: Option<&[Position]>) -> GameResult {
    if !has_legal_move(pos) {
        return if pos.in_check(pos.side_to_move) {
            GameResult::Checkmate {
                winner: pos.side_to_move.other(),
            }
        } else {
            GameResult::Stalemate
        };
    }

    if let Some(history) = history
        && repetitions(pos, history) >= REPETITION_LIMIT
    {
        return GameResult::Draw {
            reason: DrawReason::ThreefoldRepetition,
        };
    }

    if pos.halfmove_clock >= FIFTY_MOVE_CLOCK {
        return GameResult::Draw {
            reason: DrawReason::FiftyMoveRule,
        };
    }

    GameResult::Ongoing
}

/// Occurrences of `pos` in `history` plus `pos` itself when the history
/// stops before it. Consecutive positions never repeat, so a trailing match
/// can only be `pos`.
fn repetitions(pos: &Position, history: &[Position]) -> usize {
    let seen = history.iter().filter(|p| p.repeats(pos)).count();
    match history.last() {
        Some(last) if last.repeats(pos) => seen,
        _ => seen + 1,
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod outcome_tests;
