//! Date and time cell parsing for administration rows.

use chrono::{NaiveDate, NaiveTime, Timelike};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Parses the date cell of an administration row.
///
/// A trailing time component (`2024-01-01 00:00:00`, `2024-01-01T00:00:00`)
/// is ignored.
pub fn parse_date_cell(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split([' ', 'T']).next()?;
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Parses the time cell of an administration row to second precision.
///
/// Spreadsheet exports often carry a placeholder date in front of the time
/// (`1900-01-01 08:30:00`); only the last token is used.
pub fn parse_time_cell(value: &str) -> Option<NaiveTime> {
    let time_part = value.trim().rsplit([' ', 'T']).next()?;
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time_part, format).ok())
        .and_then(|time| time.with_nanosecond(0))
}
