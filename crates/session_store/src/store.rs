use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chess_rules::GameHistoryState;
use tracing::{debug, warn};

use crate::error::Result;

/// Key used when the caller does not name a session.
pub const DEFAULT_SESSION_KEY: &str = "chess-game-state";

/// Narrow persistence interface for one session.
pub trait SessionStore {
    /// The stored session, or the empty initial state if nothing usable is
    /// stored. Never fails.
    fn load(&self) -> GameHistoryState;

    fn save(&mut self, state: &GameHistoryState) -> Result<()>;

    fn clear(&mut self) -> Result<()>;
}

/// Parse a stored record, falling back to the initial state on malformed
/// JSON, a schema mismatch or a cursor outside the move list.
pub fn decode_session(raw: &str) -> GameHistoryState {
    match serde_json::from_str::<GameHistoryState>(raw) {
        Ok(state) if state.is_structurally_valid() => state,
        Ok(state) => {
            warn!(
                index = state.current_move_index,
                len = state.move_history.len(),
                "stored session has an out-of-range cursor, starting fresh"
            );
            GameHistoryState::default()
        }
        Err(err) => {
            warn!(%err, "stored session is unreadable, starting fresh");
            GameHistoryState::default()
        }
    }
}

pub fn encode_session(state: &GameHistoryState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// In-process key-value store. Values are kept serialized, as a browser-style
/// session store would keep them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    key: String,
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: HashMap::new(),
        }
    }

    /// Put raw text under this store's key, bypassing serialization.
    pub fn insert_raw(&mut self, raw: impl Into<String>) {
        self.entries.insert(self.key.clone(), raw.into());
    }

    pub fn raw(&self) -> Option<&str> {
        self.entries.get(&self.key).map(String::as_str)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> GameHistoryState {
        match self.raw() {
            Some(raw) => decode_session(raw),
            None => GameHistoryState::default(),
        }
    }

    fn save(&mut self, state: &GameHistoryState) -> Result<()> {
        let json = encode_session(state)?;
        self.entries.insert(self.key.clone(), json);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.remove(&self.key);
        Ok(())
    }
}

/// One JSON file per session key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> GameHistoryState {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode_session(&raw),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored session");
                GameHistoryState::default()
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "cannot read stored session, starting fresh");
                GameHistoryState::default()
            }
        }
    }

    fn save(&mut self, state: &GameHistoryState) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = encode_session(state)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), moves = state.move_history.len(), "session saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
