//! Error types for the story catalog.
//!
//! The core (splitting, chain building, merging, navigation) never fails;
//! these errors come from the edges: configuration, batch parsing, logging.

use thiserror::Error;

/// Errors raised at the crate boundary
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid separator {source_text:?}: {reason}")]
    InvalidSeparator { source_text: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Integrity check failed:\n{0}")]
    Integrity(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<config::ConfigError> for CatalogError {
    fn from(err: config::ConfigError) -> Self {
        CatalogError::Config(err.to_string())
    }
}
