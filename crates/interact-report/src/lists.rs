//! Newline-delimited pair and interaction lists.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use interact_engine::WindowedPairs;
use interact_model::{InteractionRecord, MedicationPairKey, WindowBucket};

use crate::error::{ReportError, Result};
use crate::paths::OutputPaths;

/// One `name_a_name_b` line per pair, in case-insensitive order.
pub fn render_pair_list(pairs: &BTreeSet<MedicationPairKey>) -> String {
    let mut out = String::new();
    for pair in pairs {
        let _ = writeln!(out, "{pair}");
    }
    out
}

/// One `name_a_name_b<TAB>description` line per record, in pair order.
pub fn render_interactions(records: &[InteractionRecord]) -> String {
    let mut sorted: Vec<&InteractionRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.pair.cmp(&b.pair));
    let mut out = String::new();
    for record in sorted {
        let _ = writeln!(out, "{record}");
    }
    out
}

pub fn write_pair_list(path: &Path, pairs: &BTreeSet<MedicationPairKey>) -> Result<()> {
    write_text(path, &render_pair_list(pairs))?;
    info!(path = %path.display(), pairs = pairs.len(), "wrote pair list");
    Ok(())
}

pub fn write_interactions(path: &Path, records: &[InteractionRecord]) -> Result<()> {
    write_text(path, &render_interactions(records))?;
    info!(path = %path.display(), interactions = records.len(), "wrote interactions");
    Ok(())
}

/// Writes the three window lists to their files in `paths`.
pub fn write_windowed_pairs(paths: &OutputPaths, pairs: &WindowedPairs) -> Result<()> {
    for bucket in WindowBucket::ALL {
        write_pair_list(paths.window(bucket), pairs.get(bucket))?;
    }
    Ok(())
}

pub(crate) fn write_text(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ReportError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pairs: &[(&str, &str)]) -> BTreeSet<MedicationPairKey> {
        pairs
            .iter()
            .filter_map(|(a, b)| MedicationPairKey::new(a, b))
            .collect()
    }

    #[test]
    fn pair_list_is_sorted_case_insensitively() {
        let set = keys(&[("warfarin", "Aspirin"), ("b", "C"), ("Zinc", "iron"), ("a", "B")]);
        insta::assert_snapshot!(render_pair_list(&set), @r"
        a_B
        Aspirin_warfarin
        b_C
        iron_Zinc
        ");
    }

    #[test]
    fn empty_pair_list_is_empty_text() {
        assert_eq!(render_pair_list(&BTreeSet::new()), "");
    }

    #[test]
    fn interactions_are_tab_separated() {
        let records = vec![
            InteractionRecord::new(
                MedicationPairKey::new("warfarin", "heparin").unwrap(),
                "Additive anticoagulant effect",
            ),
            InteractionRecord::new(
                MedicationPairKey::new("aspirin", "warfarin").unwrap(),
                "Increases bleeding risk",
            ),
        ];
        assert_eq!(
            render_interactions(&records),
            "aspirin_warfarin\tincreases bleeding risk\nheparin_warfarin\tadditive anticoagulant effect\n"
        );
    }

    #[test]
    fn write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pairs.txt");
        write_pair_list(&path, &keys(&[("A", "B")])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "A_B\n");
    }
}
