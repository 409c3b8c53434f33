//! Medication profile: one name per line.

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::source::read_text;

pub fn read_profile(path: &Path) -> Result<Vec<String>> {
    let medications = parse_profile(&read_text(path)?);
    info!(path = %path.display(), medications = medications.len(), "profile loaded");
    Ok(medications)
}

/// Trimmed, non-blank lines in file order.
pub fn parse_profile(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
