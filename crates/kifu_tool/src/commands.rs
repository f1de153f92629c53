//! Subcommand parsing and dispatch.
//!
//! Every command loads the session, applies reducer actions, saves when the
//! state changed, and returns the text to print.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chess_rules::replay::{current_outcome, current_position, san_list};
use chess_rules::{
    Color, DrawReason, GameHistoryState, GameResult, HistoryAction, Move, ResultTag, Square,
    ValidationResult, legal_moves, moves_to_pgn, moves_to_text, parse_kifu_text, validate,
};
use session_store::SessionStore;
use tracing::info;

use crate::config::KifuConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Fen,
    Move(Vec<String>),
    Undo,
    Next,
    Prev,
    Jump(i32),
    OfferDraw,
    AcceptDraw,
    DeclineDraw,
    Resign,
    Reset,
    Legal(String),
    Export { pgn: bool },
    Import(PathBuf),
    Help,
}

pub fn usage() -> String {
    [
        "kifu - two-player chess session",
        "",
        "Usage:",
        "  kifu [--config <file>] <command>",
        "",
        "Commands:",
        "  show                 Move list, cursor and result",
        "  fen                  FEN of the position at the cursor",
        "  move <uci>...        Play moves, e.g. e2e4 or e7e8n",
        "  undo                 Take back the move at the cursor",
        "  next | prev          Step through the game",
        "  jump <index>         Go to a move index (-1 = start)",
        "  offer-draw           Offer a draw for the side to move",
        "  accept-draw          Accept the pending offer",
        "  decline-draw         Decline the pending offer",
        "  resign               Resign for the side to move",
        "  reset                Start a new game",
        "  legal <square>       Legal destinations from a square",
        "  export [--pgn]       Print the game as notation",
        "  import <file>        Replace the game with a notation file",
        "  help                 This text",
    ]
    .join("\n")
}

/// Parse everything after the program name into an optional config path
/// and a command.
pub fn parse_args(args: &[String]) -> Result<(Option<PathBuf>, Command)> {
    let mut config = None;
    let mut rest = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--config needs a file");
                };
                config = Some(PathBuf::from(path));
                i += 1;
            }
            _ => rest.push(args[i].as_str()),
        }
        i += 1;
    }

    let Some((&name, params)) = rest.split_first() else {
        return Ok((config, Command::Help));
    };
    let command = match name {
        "show" => Command::Show,
        "fen" => Command::Fen,
        "move" | "mv" => {
            if params.is_empty() {
                bail!("move needs at least one move, e.g. `kifu move e2e4`");
            }
            Command::Move(params.iter().map(|s| s.to_string()).collect())
        }
        "undo" => Command::Undo,
        "next" => Command::Next,
        "prev" => Command::Prev,
        "jump" => {
            let idx = params
                .first()
                .context("jump needs an index")?
                .parse()
                .context("jump index must be a number")?;
            Command::Jump(idx)
        }
        "offer-draw" => Command::OfferDraw,
        "accept-draw" => Command::AcceptDraw,
        "decline-draw" => Command::DeclineDraw,
        "resign" => Command::Resign,
        "reset" => Command::Reset,
        "legal" => Command::Legal(params.first().context("legal needs a square")?.to_string()),
        "export" => Command::Export {
            pgn: params.contains(&"--pgn"),
        },
        "import" => Command::Import(PathBuf::from(
            *params.first().context("import needs a file")?,
        )),
        "help" | "--help" | "-h" => Command::Help,
        other => bail!("unknown command: {other}"),
    };
    Ok((config, command))
}

/// Run one command against `store`.
pub fn run(command: Command, store: &mut dyn SessionStore, cfg: &KifuConfig) -> Result<String> {
    let state = store.load();

    let action = match command {
        Command::Show => return Ok(render_status(&state)),
        Command::Fen => return Ok(current_position(&state).to_fen()),
        Command::Help => return Ok(usage()),
        Command::Legal(name) => return legal_from(&state, &name),
        Command::Export { pgn } => {
            let outcome = current_outcome(&state);
            return Ok(if pgn {
                moves_to_pgn(&state.move_history, &outcome, &cfg.headers)
            } else {
                moves_to_text(&state.move_history, Some(&outcome))
            });
        }
        Command::Reset => {
            store.clear().context("cannot clear session")?;
            info!("session reset");
            return Ok(render_status(&GameHistoryState::default()));
        }
        Command::Move(ucis) => return play_moves(state, &ucis, store),
        Command::Import(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let kifu = parse_kifu_text(&text);
            let mut imported = kifu
                .moves
                .into_iter()
                .fold(GameHistoryState::default(), |s, mv| {
                    s.reduce(HistoryAction::Move(mv))
                });
            if let Some(tag) = kifu.result
                && let Some(result) = recorded_result(tag, &current_outcome(&imported))
            {
                info!(%tag, %result, "keeping result recorded in the file");
                imported.game_result = result;
            }
            store.save(&imported).context("cannot save session")?;
            info!(moves = imported.move_history.len(), path = %path.display(), "imported game");
            return Ok(render_status(&imported));
        }
        Command::Undo => HistoryAction::Undo,
        Command::Next => HistoryAction::NextMove,
        Command::Prev => HistoryAction::PreviousMove,
        Command::Jump(idx) => HistoryAction::JumpToMove(idx),
        Command::OfferDraw => HistoryAction::OfferDraw,
        Command::AcceptDraw => HistoryAction::AcceptDraw,
        Command::DeclineDraw => HistoryAction::DeclineDraw,
        Command::Resign => HistoryAction::Resign,
    };

    let next = state.reduce(action);
    if next != state {
        store.save(&next).context("cannot save session")?;
    }
    Ok(render_status(&next))
}

/// The result to store for an imported game whose file ends with `tag`.
/// A finish the board already shows needs nothing stored; a decisive tag on
/// an open board is read as a resignation and a drawn one as an agreement.
fn recorded_result(tag: ResultTag, board: &GameResult) -> Option<GameResult> {
    if board.is_over() {
        return None;
    }
    match tag {
        ResultTag::WhiteWins => Some(GameResult::Resignation {
            winner: Color::White,
        }),
        ResultTag::BlackWins => Some(GameResult::Resignation {
            winner: Color::Black,
        }),
        ResultTag::Draw => Some(GameResult::Draw {
            reason: DrawReason::Agreed,
        }),
        ResultTag::Unfinished => None,
    }
}

/// Validate and play `ucis` in order. Nothing is saved unless all of them
/// are legal.
fn play_moves(state: GameHistoryState, ucis: &[String], store: &mut dyn SessionStore) -> Result<String> {
    let mut next = state;
    for uci in ucis {
        let mv = Move::from_uci(uci).with_context(|| format!("bad move {uci:?}"))?;
        let outcome = current_outcome(&next);
        if outcome.is_over() {
            return Ok(format!("game is over: {outcome}"));
        }
        if let ValidationResult::Invalid(reason) = validate(&current_position(&next), &mv) {
            return Ok(format!("illegal move {uci}: {reason}"));
        }
        next = next.reduce(HistoryAction::Move(mv));
    }
    store.save(&next).context("cannot save session")?;
    Ok(render_status(&next))
}

fn legal_from(state: &GameHistoryState, name: &str) -> Result<String> {
    let from: Square = name.parse().with_context(|| format!("bad square {name:?}"))?;
    let targets: Vec<String> = legal_moves(&current_position(state), from)
        .iter()
        .map(Square::to_string)
        .collect();
    Ok(if targets.is_empty() {
        format!("{from}: no legal moves")
    } else {
        format!("{from}: {}", targets.join(" "))
    })
}

/// Numbered move list with the cursor marked, then the game status.
pub fn render_status(state: &GameHistoryState) -> String {
    let mut out = String::new();
    let sans = san_list(&state.move_history);
    let cursor = state.current_move_index;

    let mut line = String::new();
    for (ply, san) in sans.iter().enumerate() {
        if ply % 2 == 0 {
            let _ = write!(line, "{}. ", ply / 2 + 1);
        }
        if ply as i32 == cursor && !state.is_at_end() {
            let _ = write!(line, "[{san}] ");
        } else {
            let _ = write!(line, "{san} ");
        }
    }
    let line = line.trim_end();
    out.push_str(if line.is_empty() { "(no moves)" } else { line });
    out.push('\n');

    let _ = writeln!(
        out,
        "cursor: {} of {}{}",
        cursor + 1,
        state.move_history.len(),
        if state.is_previewing { " (previewing)" } else { "" }
    );
    let _ = writeln!(out, "to move: {}", state.side_to_move_at_cursor());
    if let Some(color) = state.draw_offer_by {
        let _ = writeln!(out, "draw offered by: {color}");
    }
    let _ = write!(out, "result: {}", current_outcome(state));
    out
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
