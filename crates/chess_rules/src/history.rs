//! The game-history reducer.
//!
//! `GameHistoryState` is a plain serializable value: the move list, a cursor
//! into it and the results that are recorded rather than derived from the
//! board (agreed draws, resignations). Board positions are never stored here;
//! see `replay` for rebuilding them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::outcome::{DrawReason, GameResult};
use crate::types::{Color, Move};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameHistoryState {
    pub move_history: Vec<Move>,
    /// Index of the last move shown; `-1` is the initial position.
    pub current_move_index: i32,
    pub is_previewing: bool,
    pub draw_offer_by: Option<Color>,
    pub game_result: GameResult,
}

impl Default for GameHistoryState {
    fn default() -> Self {
        Self {
            move_history: Vec::new(),
            current_move_index: -1,
            is_previewing: false,
            draw_offer_by: None,
            game_result: GameResult::Ongoing,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryAction {
    Move(Move),
    Undo,
    Reset,
    NextMove,
    PreviousMove,
    JumpToMove(i32),
    OfferDraw,
    AcceptDraw,
    DeclineDraw,
    Resign,
}

impl GameHistoryState {
    /// `-1 <= current_move_index < move_history.len()`.
    pub fn is_structurally_valid(&self) -> bool {
        let len = self.move_history.len() as i64;
        let idx = self.current_move_index as i64;
        (-1..len).contains(&idx)
    }

    /// Moves up to and including the cursor.
    pub fn moves_to_cursor(&self) -> &[Move] {
        let end = (self.current_move_index + 1).max(0) as usize;
        &self.move_history[..end.min(self.move_history.len())]
    }

    pub fn is_at_end(&self) -> bool {
        self.current_move_index == self.last_index()
    }

    fn last_index(&self) -> i32 {
        self.move_history.len() as i32 - 1
    }

    /// Side to move at the cursor, from its parity: White before the first
    /// move and after every Black move.
    pub fn side_to_move_at_cursor(&self) -> Color {
        if self.current_move_index % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Apply one action and return the next state. Actions that do not
    /// apply in the current state return an unchanged copy.
    pub fn reduce(&self, action: HistoryAction) -> GameHistoryState {
        let mut next = self.clone();
        match action {
            HistoryAction::Move(mv) => {
                if self.game_result.is_over() {
                    debug!(mv = %mv, result = %self.game_result, "move ignored, game is over");
                    return next;
                }
                next.move_history.truncate(self.moves_to_cursor().len());
                next.move_history.push(mv);
                next.current_move_index = next.last_index();
                next.is_previewing = false;
                next.draw_offer_by = None;
            }
            HistoryAction::Undo => {
                if self.current_move_index >= 0 {
                    next.move_history.truncate(self.current_move_index as usize);
                    next.current_move_index -= 1;
                    next.is_previewing = false;
                }
            }
            HistoryAction::Reset => return GameHistoryState::default(),
            HistoryAction::NextMove => {
                if self.current_move_index < self.last_index() {
                    next.seek(self.current_move_index + 1);
                }
            }
            HistoryAction::PreviousMove => {
                if self.current_move_index > -1 {
                    next.seek(self.current_move_index - 1);
                }
            }
            HistoryAction::JumpToMove(idx) => {
                if (-1..=self.last_index()).contains(&idx) {
                    next.seek(idx);
                } else {
                    debug!(idx, len = self.move_history.len(), "jump target out of range");
                }
            }
            HistoryAction::OfferDraw => {
                if !self.game_result.is_over() {
                    next.draw_offer_by = Some(self.side_to_move_at_cursor());
                }
            }
            HistoryAction::AcceptDraw => {
                if self.draw_offer_by.is_some() && !self.game_result.is_over() {
                    next.game_result = GameResult::Draw {
                        reason: DrawReason::Agreed,
                    };
                    next.draw_offer_by = None;
                }
            }
            HistoryAction::DeclineDraw => next.draw_offer_by = None,
            HistoryAction::Resign => {
                if !self.game_result.is_over() {
                    next.game_result = GameResult::Resignation {
                        winner: self.side_to_move_at_cursor().other(),
                    };
                }
            }
        }
        next
    }

    fn seek(&mut self, idx: i32) {
        self.current_move_index = idx;
        self.is_previewing = idx != self.last_index();
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
