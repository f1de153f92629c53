//! `kifu.toml` settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_rules::PgnHeaders;
use serde::Deserialize;
use session_store::DEFAULT_SESSION_KEY;

pub const DEFAULT_CONFIG_FILE: &str = "kifu.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KifuConfig {
    /// Directory holding one JSON file per session.
    pub store_dir: PathBuf,
    pub session_key: String,
    /// Defaults for PGN export headers.
    pub headers: PgnHeaders,
}

impl Default for KifuConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(".kifu"),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            headers: PgnHeaders::default(),
        }
    }
}

impl KifuConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid kifu config")
    }

    /// Read the config. An explicitly named file must exist; the default
    /// `kifu.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        match std::fs::read_to_string(path) {
            Ok(text) => {
                Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
            }
            Err(err) if explicit.is_none() && err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
                Ok(Self::default())
            }
            Err(err) => {
                Err(err).with_context(|| format!("cannot read config {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
