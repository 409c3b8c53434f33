//! Ingestion of the three run inputs.
//!
//! # Features
//!
//! - **Administrations**: delimited rows of `date, time, patient, medication`
//!   parsed into [`AdministrationEvent`](interact_model::AdministrationEvent)s.
//!   Malformed rows are skipped and reported as [`RowIssue`]s.
//! - **Profile**: one medication name per line.
//! - **Knowledge base**: streaming XML reader for DrugBank-style documents,
//!   namespace-qualified or not.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use interact_ingest::{CsvOptions, read_administrations, read_knowledge_base, read_profile};
//!
//! let load = read_administrations(Path::new("administrations.csv"), &CsvOptions::default())?;
//! let profile = read_profile(Path::new("profile.txt"))?;
//! let entries = read_knowledge_base(Path::new("drugbank.xml"))?;
//! ```

mod datetime;
mod error;
mod events;
mod knowledge_base;
mod profile;
mod source;

// === Error Types ===
pub use error::{IngestError, Result, RowIssue, RowIssueKind};

// === Administrations ===
pub use datetime::{parse_date_cell, parse_time_cell};
pub use events::{CsvOptions, EventLoad, parse_administrations, read_administrations, split_medications};

// === Profile ===
pub use profile::{parse_profile, read_profile};

// === Knowledge Base ===
pub use knowledge_base::{parse_knowledge_base, read_knowledge_base};
