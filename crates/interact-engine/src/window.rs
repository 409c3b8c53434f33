//! Temporal window classification for pairs of administrations.

use chrono::{NaiveDateTime, TimeDelta};

use interact_model::WindowBucket;

/// Calendar-date offset that places a pair in [`WindowBucket::Plus48h`].
pub const PLUS_48H_DAY_OFFSET: i64 = 2;

/// Exclusive upper bound of the absolute distance for [`WindowBucket::Within6h`].
pub const WITHIN_WINDOW: TimeDelta = TimeDelta::hours(6);

/// Assigns a pair of administration timestamps to at most one window.
///
/// Rules are tried in priority order:
///
/// 1. same calendar date → [`WindowBucket::SameDay`] (not a rolling 24 hours)
/// 2. later date exactly two calendar days after the earlier → [`WindowBucket::Plus48h`]
/// 3. strictly less than six hours apart → [`WindowBucket::Within6h`]
///
/// The arguments may be given in either order.
pub fn classify(first: NaiveDateTime, second: NaiveDateTime) -> Option<WindowBucket> {
    let (earlier, later) = if second < first {
        (second, first)
    } else {
        (first, second)
    };
    let day_offset = (later.date() - earlier.date()).num_days();
    if day_offset == 0 {
        Some(WindowBucket::SameDay)
    } else if day_offset == PLUS_48H_DAY_OFFSET {
        Some(WindowBucket::Plus48h)
    } else if later - earlier < WITHIN_WINDOW {
        Some(WindowBucket::Within6h)
    } else {
        None
    }
}
