//! Error types for loading track libraries

use std::path::PathBuf;
use thiserror::Error;

/// Result type for library loading
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;

#[derive(Error, Debug)]
pub enum LibraryError {
    /// Reading the library file failed
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension is not one of csv, json, yaml, yml
    #[error("Unsupported library format: {0}")]
    UnsupportedFormat(String),

    /// The document is not a list of records
    #[error("Expected a list of records, found {0}")]
    NotARecordList(&'static str),
}
