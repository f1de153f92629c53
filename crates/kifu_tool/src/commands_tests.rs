use super::*;
use chess_rules::{Color, DrawReason, GameResult};
use session_store::MemoryStore;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn exec(store: &mut MemoryStore, line: &str) -> String {
    let (_, command) = parse_args(&args(&line.split_whitespace().collect::<Vec<_>>())).unwrap();
    run(command, store, &KifuConfig::default()).unwrap()
}

#[test]
fn test_parse_args() {
    assert_eq!(parse_args(&[]).unwrap(), (None, Command::Help));
    assert_eq!(
        parse_args(&args(&["--config", "x.toml", "jump", "-1"])).unwrap(),
        (Some(PathBuf::from("x.toml")), Command::Jump(-1))
    );
    assert_eq!(
        parse_args(&args(&["move", "e2e4", "e7e5"])).unwrap().1,
        Command::Move(args(&["e2e4", "e7e5"]))
    );
    assert_eq!(
        parse_args(&args(&["export", "--pgn"])).unwrap().1,
        Command::Export { pgn: true }
    );
    assert!(parse_args(&args(&["move"])).is_err());
    assert!(parse_args(&args(&["jump", "x"])).is_err());
    assert!(parse_args(&args(&["frobnicate"])).is_err());
    assert!(parse_args(&args(&["--config"])).is_err());
}

#[test]
fn test_moves_are_saved() {
    let mut store = MemoryStore::new("t");
    let out = exec(&mut store, "move e2e4 e7e5 g1f3");
    assert!(out.starts_with("1. e4 e5 2. Nf3\n"), "{out}");
    assert!(out.contains("to move: black"));

    let state = store.load();
    assert_eq!(state.move_history.len(), 3);
    assert_eq!(state.current_move_index, 2);
}

#[test]
fn test_illegal_move_leaves_session_untouched() {
    let mut store = MemoryStore::new("t");
    exec(&mut store, "move e2e4");
    let out = exec(&mut store, "move e7e5 e1e3");
    assert_eq!(out, "illegal move e1e3: king moves one square");
    assert_eq!(store.load().move_history.len(), 1);
}

#[test]
fn test_navigation_and_branching() {
    let mut store = MemoryStore::new("t");
    exec(&mut store, "move e2e4 e7e5 g1f3");
    let out = exec(&mut store, "prev");
    assert!(out.contains("[e5]"), "{out}");
    assert!(out.contains("(previewing)"));

    exec(&mut store, "jump 0");
    assert_eq!(exec(&mut store, "fen"), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");

    exec(&mut store, "move c7c5");
    let state = store.load();
    assert_eq!(state.move_history.len(), 2);
    assert!(!state.is_previewing);
}

#[test]
fn test_draw_offer_and_accept() {
    let mut store = MemoryStore::new("t");
    exec(&mut store, "move e2e4");
    let out = exec(&mut store, "offer-draw");
    assert!(out.contains("draw offered by: black"));
    exec(&mut store, "accept-draw");
    assert_eq!(
        store.load().game_result,
        GameResult::Draw {
            reason: DrawReason::Agreed
        }
    );
    assert_eq!(exec(&mut store, "move e7e5"), "game is over: draw (agreed)");
}

#[test]
fn test_resign_export_and_reset() {
    let mut store = MemoryStore::new("t");
    exec(&mut store, "move e2e4 e7e5");
    exec(&mut store, "resign");
    assert_eq!(
        store.load().game_result,
        GameResult::Resignation {
            winner: Color::Black
        }
    );
    assert_eq!(exec(&mut store, "export"), "1. e4 e5 0-1 (resignation)");

    let pgn = exec(&mut store, "export --pgn");
    assert!(pgn.starts_with("[Event \"Casual Game\"]\n"));
    assert!(pgn.ends_with("1. e4 e5 0-1\n"));

    exec(&mut store, "reset");
    assert_eq!(store.raw(), None);
    assert_eq!(store.load(), GameHistoryState::default());
}

#[test]
fn test_legal_targets() {
    let mut store = MemoryStore::new("t");
    assert_eq!(exec(&mut store, "legal g1"), "g1: f3 h3");
    assert_eq!(exec(&mut store, "legal e7"), "e7: no legal moves");
}

#[test]
fn test_import_replaces_session() {
    let path = std::env::temp_dir().join(format!("kifu_tool_import_{}.pgn", std::process::id()));
    std::fs::write(&path, "[Event \"x\"]\n\n1. d4 d5 2. c4 {gambit} e6 *\n").unwrap();

    let mut store = MemoryStore::new("t");
    exec(&mut store, "move e2e4");
    let (_, command) = parse_args(&args(&["import", path.to_str().unwrap()])).unwrap();
    run(command, &mut store, &KifuConfig::default()).unwrap();

    let state = store.load();
    let ucis: Vec<String> = state.move_history.iter().map(|m| m.to_uci()).collect();
    assert_eq!(ucis, ["d2d4", "d7d5", "c2c4", "e7e6"]);
    assert_eq!(state.move_history[2].comment.as_deref(), Some("gambit"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_import_keeps_recorded_result() {
    let path = std::env::temp_dir().join(format!("kifu_tool_result_{}.txt", std::process::id()));
    let mut store = MemoryStore::new("t");
    let import = |store: &mut MemoryStore, text: &str| {
        std::fs::write(&path, text).unwrap();
        let (_, command) = parse_args(&args(&["import", path.to_str().unwrap()])).unwrap();
        run(command, store, &KifuConfig::default()).unwrap();
        store.load().game_result
    };

    assert_eq!(
        import(&mut store, "1. e4 e5 2. Nf3 0-1 (resignation)"),
        GameResult::Resignation {
            winner: Color::Black
        }
    );
    assert_eq!(
        import(&mut store, "1. d4 d5 1/2-1/2 (draw (agreed))"),
        GameResult::Draw {
            reason: DrawReason::Agreed
        }
    );
    assert_eq!(import(&mut store, "1. e4 e5 *"), GameResult::Ongoing);
    // Mate on the board speaks for itself
    assert_eq!(
        import(&mut store, "1. f3 e5 2. g4 Qh4# 0-1 (checkmate)"),
        GameResult::Ongoing
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_status_of_empty_game() {
    let mut store = MemoryStore::new("t");
    assert_eq!(
        exec(&mut store, "show"),
        "(no moves)\ncursor: 0 of 0\nto move: white\nresult: ongoing"
    );
}
