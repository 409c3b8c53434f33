use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed timeline XML at byte {position}: {message}")]
    Xml { position: u64, message: String },
    #[error("invalid timeline tree: {0}")]
    InvalidTree(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
