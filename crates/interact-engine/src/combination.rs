//! Medication-pair enumeration per temporal window.

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::{debug, info};

use interact_model::{AdministrationEvent, MedicationPairKey, WindowBucket};

use crate::timeline::EventTimeline;
use crate::window::classify;

/// Medication pairs collected for each window.
///
/// After [`compute_combinations`] the `plus_48h` set also contains every
/// same-day pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowedPairs {
    same_day: BTreeSet<MedicationPairKey>,
    plus_48h: BTreeSet<MedicationPairKey>,
    within_6h: BTreeSet<MedicationPairKey>,
}

impl WindowedPairs {
    pub fn get(&self, bucket: WindowBucket) -> &BTreeSet<MedicationPairKey> {
        match bucket {
            WindowBucket::SameDay => &self.same_day,
            WindowBucket::Plus48h => &self.plus_48h,
            WindowBucket::Within6h => &self.within_6h,
        }
    }

    fn get_mut(&mut self, bucket: WindowBucket) -> &mut BTreeSet<MedicationPairKey> {
        match bucket {
            WindowBucket::SameDay => &mut self.same_day,
            WindowBucket::Plus48h => &mut self.plus_48h,
            WindowBucket::Within6h => &mut self.within_6h,
        }
    }

    pub fn same_day(&self) -> &BTreeSet<MedicationPairKey> {
        &self.same_day
    }

    pub fn plus_48h(&self) -> &BTreeSet<MedicationPairKey> {
        &self.plus_48h
    }

    pub fn within_6h(&self) -> &BTreeSet<MedicationPairKey> {
        &self.within_6h
    }

    pub fn len(&self, bucket: WindowBucket) -> usize {
        self.get(bucket).len()
    }

    pub fn is_empty(&self) -> bool {
        WindowBucket::ALL.iter().all(|bucket| self.get(*bucket).is_empty())
    }

    /// Unions `other` into `self`. Keys already present keep their spelling.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.same_day.extend(other.same_day);
        self.plus_48h.extend(other.plus_48h);
        self.within_6h.extend(other.within_6h);
        self
    }

    fn insert_all(
        &mut self,
        bucket: WindowBucket,
        pairs: impl IntoIterator<Item = MedicationPairKey>,
    ) {
        self.get_mut(bucket).extend(pairs);
    }

    /// Any same-day co-administration is also a 48-hour review candidate.
    fn fold_same_day_into_plus_48h(&mut self) {
        self.plus_48h.extend(self.same_day.iter().cloned());
    }
}

/// Computes the three windowed pair sets over every patient of a timeline.
///
/// Patients are processed independently on the rayon pool and their sets are
/// merged afterwards; the result does not depend on scheduling.
pub fn compute_combinations(timeline: &EventTimeline) -> WindowedPairs {
    let mut pairs = timeline
        .by_patient()
        .par_iter()
        .map(|(_, events)| combine_patient(events))
        .reduce(WindowedPairs::default, WindowedPairs::merge);
    pairs.fold_same_day_into_plus_48h();
    info!(
        patients = timeline.patient_count(),
        events = timeline.event_count(),
        same_day = pairs.same_day.len(),
        plus_48h = pairs.plus_48h.len(),
        within_6h = pairs.within_6h.len(),
        "combinations computed"
    );
    pairs
}

/// Collects windowed pairs for one patient's events.
///
/// Every unordered pair of events `(i, j)` with `i <= j` is visited once; the
/// `i == j` case pairs the medications given together in a single event.
/// The returned sets do not yet include the same-day / 48-hour union.
pub fn combine_patient(events: &[AdministrationEvent]) -> WindowedPairs {
    let mut pairs = WindowedPairs::default();
    let mut classified = 0usize;
    for (index, first) in events.iter().enumerate() {
        for second in &events[index..] {
            let Some(bucket) = classify(first.timestamp(), second.timestamp()) else {
                continue;
            };
            classified += 1;
            pairs.insert_all(
                bucket,
                medication_pairs(first.medications(), second.medications()),
            );
        }
    }
    debug!(
        events = events.len(),
        classified_event_pairs = classified,
        "patient combinations collected"
    );
    pairs
}

fn medication_pairs<'a>(
    first: &'a [String],
    second: &'a [String],
) -> impl Iterator<Item = MedicationPairKey> + 'a {
    first.iter().flat_map(move |left| {
        second
            .iter()
            .filter_map(move |right| MedicationPairKey::new(left, right))
    })
}
