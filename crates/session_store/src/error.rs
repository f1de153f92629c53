use thiserror::Error;

/// Write-side failures. Reads never fail; see `SessionStore::load`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session could not be serialized: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
