// Error types for the DID cache.
// Storage engine faults, payload decoding faults, and bootstrap failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Corrupt cache payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not resolve the user's home directory")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, CacheError>;
