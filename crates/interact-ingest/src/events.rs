//! Administration rows: `date, time, patient, medication`.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use interact_model::AdministrationEvent;

use crate::datetime::{parse_date_cell, parse_time_cell};
use crate::error::{Result, RowIssue, RowIssueKind};
use crate::source::read_bytes;

/// Separator between medications given together in one cell.
pub const MEDICATION_SEPARATOR: char = '_';

const DATE_COLUMN: usize = 0;
const TIME_COLUMN: usize = 1;
const PATIENT_COLUMN: usize = 2;
const MEDICATION_COLUMN: usize = 3;

/// Delimited-text layout of the administration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Whether the first row holds column titles.
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

/// Parsed administrations plus the rows that had to be skipped.
#[derive(Debug, Clone, Default)]
pub struct EventLoad {
    pub events: Vec<AdministrationEvent>,
    pub issues: Vec<RowIssue>,
}

impl EventLoad {
    pub fn rows(&self) -> usize {
        self.events.len() + self.issues.len()
    }
}

/// Reads administration rows from a delimited text file.
///
/// # Errors
///
/// Fails only when the file itself cannot be loaded. Individual bad rows are
/// returned in [`EventLoad::issues`].
pub fn read_administrations(path: &Path, options: &CsvOptions) -> Result<EventLoad> {
    let bytes = read_bytes(path)?;
    let load = parse_records(&bytes, options);
    info!(
        path = %path.display(),
        events = load.events.len(),
        skipped = load.issues.len(),
        "administrations loaded"
    );
    Ok(load)
}

/// Parses administration rows from in-memory text.
pub fn parse_administrations(text: &str, options: &CsvOptions) -> EventLoad {
    parse_records(text.as_bytes(), options)
}

/// Records that are not valid UTF-8 become [`RowIssueKind::Record`] issues.
fn parse_records(bytes: &[u8], options: &CsvOptions) -> EventLoad {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_reader(bytes);

    let mut load = EventLoad::default();
    let first_data_line: u64 = if options.has_headers { 2 } else { 1 };
    for (offset, result) in reader.records().enumerate() {
        let fallback_line = first_data_line + offset as u64;
        let parsed = match result {
            Ok(record) => {
                let line = record
                    .position()
                    .map_or(fallback_line, csv::Position::line);
                if is_blank(&record) {
                    debug!(line, "skipping blank row");
                    continue;
                }
                parse_row(&record).map_err(|kind| RowIssue { line, kind })
            }
            Err(error) => {
                let line = error
                    .position()
                    .map_or(fallback_line, csv::Position::line);
                Err(RowIssue {
                    line,
                    kind: RowIssueKind::Record(error.to_string()),
                })
            }
        };
        match parsed {
            Ok(event) => load.events.push(event),
            Err(issue) => {
                warn!(line = issue.line, reason = %issue.kind, "skipping malformed administration row");
                load.issues.push(issue);
            }
        }
    }
    load
}

/// Splits a medication cell on `_` into trimmed, non-empty names.
pub fn split_medications(cell: &str) -> Vec<String> {
    cell.split(MEDICATION_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_row(record: &StringRecord) -> std::result::Result<AdministrationEvent, RowIssueKind> {
    let date_cell = cell(record, DATE_COLUMN, "date")?;
    let time_cell = cell(record, TIME_COLUMN, "time")?;
    let patient = cell(record, PATIENT_COLUMN, "patient")?;
    let medication_cell = cell(record, MEDICATION_COLUMN, "medication")?;

    let date = parse_date_cell(date_cell)
        .ok_or_else(|| RowIssueKind::InvalidDate(date_cell.to_string()))?;
    let time = parse_time_cell(time_cell)
        .ok_or_else(|| RowIssueKind::InvalidTime(time_cell.to_string()))?;
    let medications = split_medications(medication_cell);
    if medications.is_empty() {
        return Err(RowIssueKind::NoMedications(medication_cell.to_string()));
    }
    Ok(AdministrationEvent::new(
        date.and_time(time),
        patient,
        medications,
    )?)
}

fn cell<'r>(
    record: &'r StringRecord,
    index: usize,
    name: &'static str,
) -> std::result::Result<&'r str, RowIssueKind> {
    record
        .get(index)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(RowIssueKind::MissingCell(name))
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}
