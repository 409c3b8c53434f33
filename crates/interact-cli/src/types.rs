use std::path::PathBuf;

use interact_model::WindowBucket;
use serde::Serialize;

/// Outcome of a full `run`, printed as a table and optionally written as JSON.
#[derive(Debug, Serialize)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub combinations: Option<CombinationSummary>,
    pub interactions: Option<InteractionSummary>,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

#[derive(Debug, Serialize)]
pub struct CombinationSummary {
    pub patients: usize,
    pub events: usize,
    /// Rows dropped during ingestion. Always zero for tree sources.
    pub skipped_rows: usize,
    pub windows: Vec<WindowSummary>,
    pub timeline: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct WindowSummary {
    pub bucket: WindowBucket,
    pub pairs: usize,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct InteractionSummary {
    pub profile_size: usize,
    pub knowledge_base_entries: usize,
    pub interactions: usize,
    pub not_found: Vec<String>,
    pub output: Option<PathBuf>,
}
