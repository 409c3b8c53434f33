//! Error types for input ingestion.

use std::path::PathBuf;

use thiserror::Error;

use interact_model::ModelError;

/// Whole-input failures. Any of these aborts the branch that needed the input.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not UTF-8 text.
    #[error("unsupported encoding in {path}: {encoding}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Knowledge-base document is not well-formed XML.
    #[error("malformed XML in {path} at byte {position}: {message}")]
    Xml {
        path: PathBuf,
        position: u64,
        message: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// A skipped input row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct RowIssue {
    /// 1-based line number in the source file.
    pub line: u64,
    pub kind: RowIssueKind,
}

/// Why a row was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowIssueKind {
    #[error("missing {0} cell")]
    MissingCell(&'static str),
    #[error("unrecognized date '{0}'")]
    InvalidDate(String),
    #[error("unrecognized time '{0}'")]
    InvalidTime(String),
    #[error("no medication names in '{0}'")]
    NoMedications(String),
    #[error("unreadable record: {0}")]
    Record(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}
