//! Catalog error types
//!
//! Only source-level failures cross the engine boundary. Per-item defects
//! (missing names, unparseable prices, unknown ids) degrade to defaults and
//! never show up here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog document does not exist at the configured path
    #[error("Catalog source not found: {path}")]
    SourceUnavailable { path: PathBuf },

    /// The catalog document exists but could not be read
    #[error("Failed to read catalog source: {path}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not valid JSON
    #[error("Failed to parse catalog source {path}: {source}")]
    SourceMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog document parsed, but its shape is unusable
    #[error("Invalid catalog source {path}: {reason}")]
    InvalidSource { path: PathBuf, reason: String },

    /// A configuration file could not be read or parsed
    #[error("Configuration error in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl CatalogError {
    /// Whether this error came from the catalog document itself
    pub fn is_source_error(&self) -> bool {
        !matches!(self, CatalogError::Config { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
