// File: src/error.rs
use thiserror::Error;

/// Failures at the edges of the resolver: files and oracle responses.
/// Classification itself never fails.
#[derive(Debug, Error)]
pub enum PantryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("binary learning state is corrupt: {0}")]
    Binary(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported learning state version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("no JSON object found in response")]
    NoJson,
}

pub type Result<T> = std::result::Result<T, PantryError>;
