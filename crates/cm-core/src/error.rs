//! Error types for cm-core

use thiserror::Error;

/// Main error type for cm-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cm-core
pub type Result<T> = std::result::Result<T, Error>;
