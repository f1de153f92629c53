//! kifu CLI
//!
//! Drive a persisted two-player game from the shell: play and take back
//! moves, browse the history, settle draws and resignations, and move games
//! in and out as notation.

mod commands;
mod config;

use std::env;
use std::process::ExitCode;

use anyhow::Result;
use session_store::FileStore;
use tracing_subscriber::EnvFilter;

use crate::commands::{parse_args, run};
use crate::config::KifuConfig;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn try_main() -> Result<String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (config_path, command) = parse_args(&args)?;
    let cfg = KifuConfig::load(config_path.as_deref())?;

    let mut store = FileStore::new(&cfg.store_dir, &cfg.session_key);
    tracing::debug!(path = %store.path().display(), ?command, "dispatching");
    run(command, &mut store, &cfg)
}

fn main() -> ExitCode {
    init_logging();

    match try_main() {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("Run `kifu help` for usage.");
            ExitCode::FAILURE
        }
    }
}
