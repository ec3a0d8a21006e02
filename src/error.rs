use std::path::PathBuf;

use crate::models::FileId;

/// Failures of store commands.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No file with id {0} is loaded")]
    UnknownFile(FileId),
    #[error("Index {index} is out of range for {len} files")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
