//! End-to-end scenarios for both engine branches.

use chrono::{NaiveDate, NaiveDateTime};

use interact_engine::{EventTimeline, InteractionIndex, compute_combinations, match_profile};
use interact_model::{AdministrationEvent, KnowledgeBaseEntry, MedicationPairKey};

fn ts(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn event(patient: &str, timestamp: NaiveDateTime, meds: &[&str]) -> AdministrationEvent {
    AdministrationEvent::new(
        timestamp,
        patient,
        meds.iter().map(|m| (*m).to_string()).collect(),
    )
    .unwrap()
}

fn rendered<'a>(keys: impl IntoIterator<Item = &'a MedicationPairKey>) -> Vec<String> {
    keys.into_iter().map(ToString::to_string).collect()
}

#[test]
fn same_day_includes_pairs_within_one_event() {
    let timeline = EventTimeline::from_events(vec![
        event("P", ts(2024, 1, 1, 8), &["A", "B"]),
        event("P", ts(2024, 1, 1, 20), &["C"]),
    ]);
    let pairs = compute_combinations(&timeline);
    assert_eq!(rendered(pairs.same_day()), ["A_B", "A_C", "B_C"]);
    assert!(pairs.within_6h().is_empty());
}

#[test]
fn two_days_apart_is_plus_48h_only() {
    let timeline = EventTimeline::from_events(vec![
        event("P", ts(2024, 1, 1, 8), &["X"]),
        event("P", ts(2024, 1, 3, 8), &["Y"]),
    ]);
    let pairs = compute_combinations(&timeline);
    assert!(pairs.same_day().is_empty());
    assert_eq!(rendered(pairs.plus_48h()), ["X_Y"]);
    assert!(pairs.within_6h().is_empty());
}

#[test]
fn across_midnight_is_within_6h() {
    let timeline = EventTimeline::from_events(vec![
        event("P", ts(2024, 1, 1, 23), &["X"]),
        event("P", ts(2024, 1, 2, 2), &["Y"]),
    ]);
    let pairs = compute_combinations(&timeline);
    assert!(pairs.same_day().is_empty());
    assert!(pairs.plus_48h().is_empty());
    assert_eq!(rendered(pairs.within_6h()), ["X_Y"]);
}

#[test]
fn patients_never_mix() {
    let timeline = EventTimeline::from_events(vec![
        event("P1", ts(2024, 1, 1, 8), &["A"]),
        event("P2", ts(2024, 1, 1, 8), &["B"]),
    ]);
    let pairs = compute_combinations(&timeline);
    assert!(pairs.is_empty());
}

#[test]
fn results_union_across_patients() {
    let timeline = EventTimeline::from_events(vec![
        event("P1", ts(2024, 1, 1, 8), &["A", "B"]),
        event("P2", ts(2024, 2, 1, 8), &["C", "D"]),
        event("P2", ts(2024, 2, 1, 9), &["b", "a"]),
    ]);
    let pairs = compute_combinations(&timeline);
    assert_eq!(
        rendered(pairs.same_day()),
        ["A_B", "a_C", "a_D", "b_C", "b_D", "C_D"]
    );
}

#[test]
fn known_interaction_is_reported() {
    let index = InteractionIndex::build(vec![
        KnowledgeBaseEntry::new("Aspirin").with_interaction("Warfarin", "Increases bleeding risk"),
    ]);
    let result = match_profile(&["aspirin"], &index);
    let lines: Vec<String> = result
        .interactions
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(lines, ["aspirin_warfarin\tincreases bleeding risk"]);
    assert!(result.not_found.is_empty());
}

#[test]
fn unknown_medication_is_collected() {
    let index = InteractionIndex::build(vec![
        KnowledgeBaseEntry::new("Aspirin").with_interaction("Warfarin", "Increases bleeding risk"),
    ]);
    let result = match_profile(&["unknownium"], &index);
    assert!(result.interactions.is_empty());
    assert_eq!(
        result.not_found.into_iter().collect::<Vec<_>>(),
        ["unknownium"]
    );
}
