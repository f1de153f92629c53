use super::*;
use chess_rules::{Color, HistoryAction, Move};

fn sample_state() -> GameHistoryState {
    ["e2e4", "e7e5", "g1f3"]
        .iter()
        .fold(GameHistoryState::default(), |s, u| {
            s.reduce(HistoryAction::Move(Move::from_uci(u).unwrap()))
        })
        .reduce(HistoryAction::PreviousMove)
        .reduce(HistoryAction::OfferDraw)
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "session_store_{}_{name}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_memory_round_trip() {
    let mut store = MemoryStore::new(DEFAULT_SESSION_KEY);
    assert_eq!(store.load(), GameHistoryState::default());

    let state = sample_state();
    store.save(&state).unwrap();
    let loaded = store.load();
    assert_eq!(loaded, state);
    assert_eq!(loaded.draw_offer_by, Some(Color::White));
    assert!(loaded.is_previewing);

    store.clear().unwrap();
    assert_eq!(store.raw(), None);
    assert_eq!(store.load(), GameHistoryState::default());
}

#[test]
fn test_malformed_json_falls_back() {
    let mut store = MemoryStore::new("k");
    store.insert_raw("{ not json");
    assert_eq!(store.load(), GameHistoryState::default());
}

#[test]
fn test_schema_mismatch_falls_back() {
    let mut store = MemoryStore::new("k");
    // Move record without `to`
    store.insert_raw(
        r#"{"moveHistory":[{"from":"e2"}],"currentMoveIndex":0,"isPreviewing":false,"drawOfferBy":null,"gameResult":{"type":"ongoing"}}"#,
    );
    assert_eq!(store.load(), GameHistoryState::default());

    // Bad square name
    store.insert_raw(
        r#"{"moveHistory":[{"from":"z9","to":"e4"}],"currentMoveIndex":0,"isPreviewing":false,"drawOfferBy":null,"gameResult":{"type":"ongoing"}}"#,
    );
    assert_eq!(store.load(), GameHistoryState::default());
}

#[test]
fn test_out_of_range_cursor_falls_back() {
    let mut store = MemoryStore::new("k");
    let mut value = serde_json::to_value(sample_state()).unwrap();
    value["currentMoveIndex"] = serde_json::json!(7);
    store.insert_raw(value.to_string());
    assert_eq!(store.load(), GameHistoryState::default());

    value["currentMoveIndex"] = serde_json::json!(-2);
    store.insert_raw(value.to_string());
    assert_eq!(store.load(), GameHistoryState::default());
}

#[test]
fn test_optional_move_fields_may_be_missing() {
    let store_raw = r#"{"moveHistory":[{"from":"e2","to":"e4"}],"currentMoveIndex":0,"isPreviewing":false,"drawOfferBy":null,"gameResult":{"type":"ongoing"}}"#;
    let state = decode_session(store_raw);
    assert_eq!(state.move_history.len(), 1);
    assert_eq!(state.move_history[0].promotion, None);
}

#[test]
fn test_file_store_round_trip() {
    let dir = temp_dir("round_trip");
    let mut store = FileStore::new(&dir, "game");
    assert_eq!(store.load(), GameHistoryState::default());

    let state = sample_state();
    store.save(&state).unwrap();
    assert!(store.path().exists());
    assert_eq!(FileStore::new(&dir, "game").load(), state);

    // Other keys are separate sessions
    assert_eq!(FileStore::new(&dir, "other").load(), GameHistoryState::default());

    store.clear().unwrap();
    assert!(!store.path().exists());
    // Clearing twice is fine
    store.clear().unwrap();

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_file_store_corrupt_file_falls_back() {
    let dir = temp_dir("corrupt");
    fs::create_dir_all(&dir).unwrap();
    let store = FileStore::new(&dir, "game");
    fs::write(store.path(), "[]").unwrap();
    assert_eq!(store.load(), GameHistoryState::default());

    let _ = fs::remove_dir_all(&dir);
}
