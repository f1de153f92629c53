//! Kifu text: reading and writing whole move lists.
//!
//! The plain format is `1. e4 e5 2. Nf3 {comment} ...` with an optional
//! result token. The PGN-like format prefixes seven bracket headers and a
//! blank line. Reading is best-effort: anything that does not resolve to a
//! legal move is dropped and parsing carries on.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::apply::apply_unchecked;
use crate::board::Position;
use crate::movegen::legal_moves;
use crate::outcome::GameResult;
use crate::san::move_to_san;
use crate::types::*;
use crate::validate::validate;

/// The short result marker used in PGN.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultTag {
    WhiteWins,
    BlackWins,
    Draw,
    Unfinished,
}

impl ResultTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultTag::WhiteWins => "1-0",
            ResultTag::BlackWins => "0-1",
            ResultTag::Draw => "1/2-1/2",
            ResultTag::Unfinished => "*",
        }
    }

    pub fn from_token(tok: &str) -> Option<ResultTag> {
        match tok {
            "1-0" => Some(ResultTag::WhiteWins),
            "0-1" => Some(ResultTag::BlackWins),
            "1/2-1/2" => Some(ResultTag::Draw),
            "*" => Some(ResultTag::Unfinished),
            _ => None,
        }
    }
}

impl From<&GameResult> for ResultTag {
    fn from(result: &GameResult) -> Self {
        match result.winner() {
            Some(Color::White) => ResultTag::WhiteWins,
            Some(Color::Black) => ResultTag::BlackWins,
            None if result.is_over() => ResultTag::Draw,
            None => ResultTag::Unfinished,
        }
    }
}

impl fmt::Display for ResultTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header values for PGN export. `Result` is always derived from the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PgnHeaders {
    pub event: String,
    pub site: String,
    pub date: String,
    pub round: String,
    pub white: String,
    pub black: String,
}

impl Default for PgnHeaders {
    fn default() -> Self {
        Self {
            event: "Casual Game".to_string(),
            site: "Local".to_string(),
            date: "????.??.??".to_string(),
            round: "-".to_string(),
            white: "White".to_string(),
            black: "Black".to_string(),
        }
    }
}

/// A decoded move list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Kifu {
    pub moves: Vec<Move>,
    pub result: Option<ResultTag>,
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

pub fn escape_comment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Move body shared by both export formats. Stops at the first move that is
/// not legal from the replayed position.
fn render_body(moves: &[Move]) -> String {
    let mut pos = Position::startpos();
    let mut parts: Vec<String> = Vec::with_capacity(moves.len() + moves.len() / 2);

    for (ply, mv) in moves.iter().enumerate() {
        if let Some(reason) = validate(&pos, mv).reason() {
            warn!(ply, mv = %mv, reason, "stopping export at illegal move");
            break;
        }
        if ply % 2 == 0 {
            parts.push(format!("{}.", ply / 2 + 1));
        }
        parts.push(move_to_san(&pos, mv));
        if let Some(comment) = &mv.comment {
            parts.push(format!("{{{}}}", escape_comment(comment)));
        }
        pos = apply_unchecked(&pos, mv);
    }
    parts.join(" ")
}

/// Short reason shown after the result token in plain text.
fn result_reason(result: &GameResult) -> String {
    match result {
        GameResult::Ongoing => "ongoing".to_string(),
        GameResult::Checkmate { .. } => "checkmate".to_string(),
        GameResult::Stalemate => "stalemate".to_string(),
        GameResult::Draw { reason } => reason.to_string(),
        GameResult::Resignation { .. } => "resignation".to_string(),
    }
}

/// Plain notation, e.g. `1. e4 e5 2. Qh5 {bold} Nc6 ... 1-0 (checkmate)`.
///
/// The result is appended only when the game is over.
pub fn moves_to_text(moves: &[Move], result: Option<&GameResult>) -> String {
    let mut text = render_body(moves);
    if let Some(result) = result
        && result.is_over()
    {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&format!("{} ({})", ResultTag::from(result), result_reason(result)));
    }
    text
}

/// PGN-like export: seven headers, a blank line, the body and a result token.
pub fn moves_to_pgn(moves: &[Move], result: &GameResult, headers: &PgnHeaders) -> String {
    let tag = ResultTag::from(result);
    let mut out = String::new();
    for (name, value) in [
        ("Event", &headers.event),
        ("Site", &headers.site),
        ("Date", &headers.date),
        ("Round", &headers.round),
        ("White", &headers.white),
        ("Black", &headers.black),
    ] {
        out.push_str(&format!("[{name} \"{}\"]\n", value.replace('"', "'")));
    }
    out.push_str(&format!("[Result \"{tag}\"]\n\n"));

    let body = render_body(moves);
    if !body.is_empty() {
        out.push_str(&body);
        out.push(' ');
    }
    out.push_str(tag.as_str());
    out.push('\n');
    out
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    Comment(String),
}

/// Drop bracket headers: with headers present, only text after the last
/// blank line is the move list.
fn strip_headers(text: &str) -> String {
    let lines: Vec<&str> = text.trim_end().lines().collect();
    if !lines.iter().any(|l| l.trim_start().starts_with('[')) {
        return text.to_string();
    }
    match lines.iter().rposition(|l| l.trim().is_empty()) {
        Some(blank) => lines[blank + 1..].join("\n"),
        None => lines
            .iter()
            .filter(|l| !l.trim_start().starts_with('['))
            .copied()
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Consume up to and including the closing brace; parentheses inside do not
/// count towards variation depth.
fn skip_comment_body(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while let Some(c) = chars.next() {
        match c {
            '}' => break,
            '\\' => {
                chars.next();
            }
            _ => {}
        }
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '{' {
            chars.next();
            let mut body = String::new();
            while let Some(c) = chars.next() {
                match c {
                    '}' => break,
                    '\\' => match chars.next() {
                        Some('n') => body.push('\n'),
                        Some(other) => body.push(other),
                        None => {}
                    },
                    _ => body.push(c),
                }
            }
            tokens.push(Token::Comment(body));
        } else if c == '(' {
            // Variations and trailing reasons: skipped, nesting respected
            let mut depth = 0usize;
            while let Some(c) = chars.next() {
                match c {
                    '(' => depth += 1,
                    ')' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    '{' => skip_comment_body(&mut chars),
                    _ => {}
                }
            }
        } else if c == ';' {
            for c in chars.by_ref() {
                if c == '\n' {
                    break;
                }
            }
        } else {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == '{' || c == '(' {
                    break;
                }
                word.push(c);
                chars.next();
            }
            tokens.push(Token::Word(word));
        }
    }
    tokens
}

/// Strip a leading move number (`12.`, `12...`), returning what follows it.
fn strip_move_number(word: &str) -> &str {
    let digits = word.len() - word.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 && word[digits..].starts_with('.') {
        word[digits..].trim_start_matches('.')
    } else {
        word
    }
}

/// Decode a plain or PGN-like move list, played from the standard start.
pub fn parse_kifu_text(text: &str) -> Kifu {
    let body = strip_headers(text);
    let mut pos = Position::startpos();
    let mut kifu = Kifu::default();
    // Comments only attach to a move that was actually kept
    let mut last_resolved = false;

    for token in tokenize(&body) {
        let word = match token {
            Token::Comment(text) => {
                match kifu.moves.last_mut() {
                    Some(mv) if last_resolved => mv.comment = Some(text),
                    _ => debug!(comment = %text, "dropping comment without a move"),
                }
                continue;
            }
            Token::Word(word) => word,
        };

        if let Some(tag) = ResultTag::from_token(&word) {
            kifu.result = Some(tag);
            continue;
        }
        let san = strip_move_number(&word);
        if san.is_empty() {
            continue;
        }

        match resolve_san(&pos, san) {
            Some(mv) => {
                pos = apply_unchecked(&pos, &mv);
                kifu.moves.push(mv);
                last_resolved = true;
            }
            None => {
                debug!(token = %word, fen = %pos.to_fen(), "skipping unresolvable move token");
                last_resolved = false;
            }
        }
    }
    kifu
}

/// Resolve one SAN token against `pos`. `None` when it matches no legal move
/// or more than one.
pub fn resolve_san(pos: &Position, token: &str) -> Option<Move> {
    let san = token.trim_end_matches(['+', '#', '!', '?']);
    let us = pos.side_to_move;
    let back = us.back_rank();

    let castle_to = match san {
        "O-O" | "0-0" => Some(6),
        "O-O-O" | "0-0-0" => Some(2),
        _ => None,
    };
    if let Some(file) = castle_to {
        let mv = Move::new(Square::new(4, back)?, Square::new(file, back)?);
        return validate(pos, &mv).is_valid().then_some(mv);
    }

    // Promotion suffix: `e8=Q`, also accepted without the `=`
    let (body, promotion) = match san.split_once('=') {
        Some((body, piece)) => (body, Some(PieceKind::from_letter(piece.chars().next()?)?)),
        None => match san.chars().last() {
            Some(c) if san.len() > 2 && "NBRQ".contains(c) => {
                (&san[..san.len() - 1], PieceKind::from_letter(c))
            }
            _ => (san, None),
        },
    };

    let first = body.chars().next()?;
    let kind = if first.is_ascii_uppercase() {
        PieceKind::from_letter(first)?
    } else {
        PieceKind::Pawn
    };
    let rest = if kind == PieceKind::Pawn { body } else { &body[1..] };
    let rest: String = rest.chars().filter(|&c| c != 'x' && c != '-').collect();
    if rest.len() < 2 || !rest.is_ascii() {
        return None;
    }
    let to: Square = rest[rest.len() - 2..].parse().ok()?;
    let hint = &rest[..rest.len() - 2];
    let hint_file = hint.chars().find(|c| ('a'..='h').contains(c)).map(|c| (c as u8 - b'a') as i8);
    let hint_rank = hint.chars().find(|c| ('1'..='8').contains(c)).map(|c| (c as u8 - b'1') as i8);

    let with_promo = |from: Square| {
        let mv = Move::new(from, to);
        match promotion {
            Some(kind) => mv.with_promotion(kind),
            None => mv,
        }
    };
    let reaches = |from: Square| validate(pos, &with_promo(from)).is_valid();

    if kind == PieceKind::Pawn {
        let file = hint_file.unwrap_or(to.file());
        let own_pawn = Piece::new(us, PieceKind::Pawn);
        let inferred = Square::new(file, to.rank() - us.pawn_dir());
        if let Some(from) = inferred
            && pos.piece_at(from) == Some(own_pawn)
            && reaches(from)
        {
            return Some(with_promo(from));
        }
        let candidates: Vec<Square> = (0..8)
            .filter_map(|r| Square::new(file, r))
            .filter(|&s| pos.piece_at(s) == Some(own_pawn) && reaches(s))
            .collect();
        return match candidates.as_slice() {
            [from] => Some(with_promo(*from)),
            _ => None,
        };
    }

    let piece = Piece::new(us, kind);
    let candidates: Vec<Square> = pos
        .pieces()
        .filter(|&(_, pc)| pc == piece)
        .map(|(sq, _)| sq)
        .filter(|sq| hint_file.is_none_or(|f| sq.file() == f))
        .filter(|sq| hint_rank.is_none_or(|r| sq.rank() == r))
        .filter(|&sq| legal_moves(pos, sq).contains(&to))
        .collect();
    match candidates.as_slice() {
        [from] => Some(Move::new(*from, to)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "kifu_tests.rs"]
mod kifu_tests;
