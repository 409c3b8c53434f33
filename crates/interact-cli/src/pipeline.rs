//! The two branches of a run and the driver that executes them side by side.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, error, info, info_span, warn};

use interact_engine::{EventTimeline, InteractionIndex, compute_combinations, match_profile};
use interact_ingest::{
    CsvOptions, RowIssue, read_administrations, read_knowledge_base, read_profile,
};
use interact_model::WindowBucket;
use interact_report::{
    OutputPaths, read_timeline_xml, write_interactions, write_timeline_xml, write_windowed_pairs,
};

use crate::logging::redact_value;
use crate::types::{CombinationSummary, InteractionSummary, RunResult, WindowSummary};

/// Where administration events come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    /// Delimited rows of `date, time, patient, medication`.
    Delimited(PathBuf),
    /// A timeline tree previously written by a run.
    Tree(PathBuf),
}

impl EventSource {
    /// Picks the source kind from the file extension; `.xml` means a tree.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_tree = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if is_tree {
            Self::Tree(path)
        } else {
            Self::Delimited(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Delimited(path) | Self::Tree(path) => path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub events: EventSource,
    pub profile: PathBuf,
    pub knowledge_base: PathBuf,
    pub output_dir: PathBuf,
    pub csv: CsvOptions,
    /// Write `timeline.xml` alongside the lists.
    pub write_tree: bool,
    /// Compute everything, write nothing.
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct LoadedTimeline {
    pub timeline: EventTimeline,
    pub issues: Vec<RowIssue>,
}

/// Loads administrations and groups them per patient.
pub fn load_timeline(source: &EventSource, csv: &CsvOptions) -> Result<LoadedTimeline> {
    match source {
        EventSource::Delimited(path) => {
            let load = read_administrations(path, csv)
                .with_context(|| format!("load administrations from {}", path.display()))?;
            Ok(LoadedTimeline {
                timeline: EventTimeline::from_events(load.events),
                issues: load.issues,
            })
        }
        EventSource::Tree(path) => {
            let timeline = read_timeline_xml(path)
                .with_context(|| format!("load timeline tree from {}", path.display()))?;
            Ok(LoadedTimeline {
                timeline,
                issues: Vec::new(),
            })
        }
    }
}

/// Combination branch: events, timeline, windowed pairs, lists and tree.
pub fn run_combinations(options: &RunOptions, paths: &OutputPaths) -> Result<CombinationSummary> {
    let span = info_span!("combinations", source = %options.events.path().display());
    let _guard = span.enter();
    let start = Instant::now();

    let loaded = load_timeline(&options.events, &options.csv)?;
    let timeline = loaded.timeline;
    for (patient_id, events) in timeline.patients() {
        debug!(patient = redact_value(patient_id), events = events.len(), "patient timeline");
    }
    if !loaded.issues.is_empty() {
        warn!(skipped = loaded.issues.len(), "administration rows skipped");
    }

    let pairs = compute_combinations(&timeline);

    let mut timeline_output = None;
    let mut list_outputs = false;
    if !options.dry_run {
        if options.write_tree {
            write_timeline_xml(&paths.timeline, &timeline)
                .with_context(|| format!("write {}", paths.timeline.display()))?;
            timeline_output = Some(paths.timeline.clone());
        }
        write_windowed_pairs(paths, &pairs).context("write combination lists")?;
        list_outputs = true;
    }

    let windows = WindowBucket::ALL
        .iter()
        .map(|&bucket| WindowSummary {
            bucket,
            pairs: pairs.len(bucket),
            output: list_outputs.then(|| paths.window(bucket).to_path_buf()),
        })
        .collect();

    info!(
        patients = timeline.patient_count(),
        events = timeline.event_count(),
        duration_ms = start.elapsed().as_millis(),
        "combination branch complete"
    );
    Ok(CombinationSummary {
        patients: timeline.patient_count(),
        events: timeline.event_count(),
        skipped_rows: loaded.issues.len(),
        windows,
        timeline: timeline_output,
    })
}

/// Interaction branch: profile and knowledge base into interaction lines.
pub fn run_interactions(options: &RunOptions, paths: &OutputPaths) -> Result<InteractionSummary> {
    let span = info_span!("interactions", profile = %options.profile.display());
    let _guard = span.enter();
    let start = Instant::now();

    let profile = read_profile(&options.profile)
        .with_context(|| format!("load profile from {}", options.profile.display()))?;
    let entries = read_knowledge_base(&options.knowledge_base).with_context(|| {
        format!(
            "load knowledge base from {}",
            options.knowledge_base.display()
        )
    })?;
    let index = InteractionIndex::build(entries);
    let matched = match_profile(&profile, &index);

    if !matched.all_found() {
        let names: Vec<&str> = matched.not_found.iter().map(String::as_str).collect();
        warn!(
            count = names.len(),
            names = %names.join(", "),
            "medications not found in knowledge base"
        );
    }

    let mut output = None;
    if !options.dry_run {
        write_interactions(&paths.interactions, &matched.interactions)
            .with_context(|| format!("write {}", paths.interactions.display()))?;
        output = Some(paths.interactions.clone());
    }

    info!(
        profile = profile.len(),
        entries = index.len(),
        interactions = matched.interactions.len(),
        duration_ms = start.elapsed().as_millis(),
        "interaction branch complete"
    );
    Ok(InteractionSummary {
        profile_size: profile.len(),
        knowledge_base_entries: index.len(),
        interactions: matched.interactions.len(),
        not_found: matched.not_found.into_iter().collect(),
        output,
    })
}

/// Runs both branches concurrently. A failing branch does not stop the other.
pub fn run(options: &RunOptions) -> RunResult {
    let span = info_span!("run", output_dir = %options.output_dir.display());
    let _guard = span.enter();
    let paths = OutputPaths::in_dir(&options.output_dir);

    let (combinations, interactions) = rayon::join(
        || run_combinations(options, &paths),
        || run_interactions(options, &paths),
    );

    let mut errors = Vec::new();
    let combinations = combinations
        .map_err(|err| {
            error!("combination branch failed: {err:#}");
            errors.push(format!("combinations: {err:#}"));
        })
        .ok();
    let interactions = interactions
        .map_err(|err| {
            error!("interaction branch failed: {err:#}");
            errors.push(format!("interactions: {err:#}"));
        })
        .ok();

    RunResult {
        output_dir: options.output_dir.clone(),
        dry_run: options.dry_run,
        combinations,
        interactions,
        has_errors: !errors.is_empty(),
        errors,
    }
}
