pub mod apply;
pub mod attacks;
pub mod board;
pub mod error;
pub mod history;
pub mod kifu;
pub mod movegen;
pub mod outcome;
pub mod perft;
pub mod replay;
pub mod san;
pub mod types;
pub mod validate;

// Re-export the rules surface so callers can `use chess_rules::*`
pub use apply::apply_move;
pub use attacks::attacks_square;
pub use board::*;
pub use error::{Result, RulesError};
pub use history::{GameHistoryState, HistoryAction};
pub use kifu::{Kifu, PgnHeaders, ResultTag, moves_to_pgn, moves_to_text, parse_kifu_text};
pub use movegen::*;
pub use outcome::{DrawReason, GameResult, evaluate};
pub use perft::perft;
pub use san::move_to_san;
pub use types::*;
pub use validate::{ValidationResult, validate};
