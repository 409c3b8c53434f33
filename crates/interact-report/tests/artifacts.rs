//! Integration tests for writing run artifacts to disk.

use std::fs;

use chrono::NaiveDate;

use interact_engine::{EventTimeline, compute_combinations};
use interact_model::AdministrationEvent;
use interact_report::{
    OutputPaths, ReportError, read_timeline_xml, write_timeline_xml, write_windowed_pairs,
};

fn event(day: u32, hour: u32, meds: &[&str]) -> AdministrationEvent {
    let timestamp = NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap();
    AdministrationEvent::new(
        timestamp,
        "P1",
        meds.iter().map(|m| (*m).to_string()).collect(),
    )
    .unwrap()
}

#[test]
fn writes_all_window_lists() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::in_dir(&dir.path().join("out"));
    let timeline = EventTimeline::from_events(vec![
        event(1, 8, &["Warfarin", "aspirin"]),
        event(1, 23, &["Heparin"]),
        event(2, 2, &["Insulin"]),
        event(3, 9, &["Zinc"]),
    ]);
    let pairs = compute_combinations(&timeline);
    write_windowed_pairs(&paths, &pairs).unwrap();

    let same_day = fs::read_to_string(&paths.same_day).unwrap();
    insta::assert_snapshot!(same_day, @r"
    aspirin_Heparin
    aspirin_Warfarin
    Heparin_Warfarin
    ");

    let within_6h = fs::read_to_string(&paths.within_6h).unwrap();
    insta::assert_snapshot!(within_6h, @"Heparin_Insulin");

    let plus_48h = fs::read_to_string(&paths.plus_48h).unwrap();
    insta::assert_snapshot!(plus_48h, @r"
    aspirin_Heparin
    aspirin_Warfarin
    aspirin_Zinc
    Heparin_Warfarin
    Heparin_Zinc
    Warfarin_Zinc
    ");
}

#[test]
fn timeline_tree_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeline.xml");
    let timeline = EventTimeline::from_events(vec![
        event(1, 8, &["A", "B"]),
        event(2, 9, &["C"]),
    ]);
    write_timeline_xml(&path, &timeline).unwrap();
    assert_eq!(read_timeline_xml(&path).unwrap(), timeline);
}

#[test]
fn missing_timeline_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_timeline_xml(&dir.path().join("absent.xml")).unwrap_err();
    assert!(matches!(err, ReportError::Read { .. }));
}
