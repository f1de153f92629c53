//! Error types for chess_rules

use thiserror::Error;

/// Hard failures of the rules layer.
///
/// Illegality of a candidate move is *not* an error: `validate` reports it as
/// `ValidationResult::Invalid`. `IllegalMove` is only produced when a caller
/// skips validation and hands an illegal move to `apply_move`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: String, reason: String },

    #[error("invalid square or move text: {0}")]
    InvalidSquare(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

pub type Result<T> = std::result::Result<T, RulesError>;
