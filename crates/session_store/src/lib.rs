//! Session persistence for the game history.
//!
//! The rules engine knows nothing about storage. This crate keeps one
//! serialized `GameHistoryState` per session key and hands back the empty
//! initial state whenever what it finds cannot be trusted.

mod error;
mod store;

pub use error::{Result, StoreError};
pub use store::*;
