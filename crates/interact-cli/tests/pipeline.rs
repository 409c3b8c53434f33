//! End-to-end runs of both branches over files on disk.

use std::fs;
use std::path::Path;

use interact_cli::pipeline::{EventSource, RunOptions, run};
use interact_ingest::CsvOptions;
use interact_model::WindowBucket;
use interact_report::{
    INTERACTIONS_FILE, PLUS_48H_FILE, SAME_DAY_FILE, TIMELINE_FILE, WITHIN_6H_FILE,
};

const KNOWLEDGE_BASE: &str = r#"<drugbank xmlns="http://www.drugbank.ca">
  <drug>
    <name>Aspirin</name>
    <synonyms><synonym>Acetylsalicylic acid</synonym></synonyms>
    <drug-interactions>
      <drug-interaction>
        <name>Warfarin</name>
        <description>Increases bleeding risk</description>
      </drug-interaction>
    </drug-interactions>
  </drug>
</drugbank>"#;

fn write_inputs(dir: &Path) -> RunOptions {
    let events = dir.join("administrations.csv");
    let profile = dir.join("profile.txt");
    let knowledge_base = dir.join("drugbank.xml");
    fs::write(
        &events,
        "date,time,patient,medication\n\
         2024-01-01,08:00:00,P1,Warfarin\n\
         2024-01-01,10:00:00,P1,Aspirin\n\
         2024-01-02,01:00:00,P1,Heparin\n\
         2024-01-02,not-a-time,P1,Insulin\n",
    )
    .unwrap();
    fs::write(&profile, "Aspirin\nunknownium\n").unwrap();
    fs::write(&knowledge_base, KNOWLEDGE_BASE).unwrap();
    RunOptions {
        events: EventSource::from_path(events),
        profile,
        knowledge_base,
        output_dir: dir.join("out"),
        csv: CsvOptions::default(),
        write_tree: true,
        dry_run: false,
    }
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn full_run_writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let options = write_inputs(dir.path());

    let result = run(&options);
    assert!(!result.has_errors, "{:?}", result.errors);

    let out = &options.output_dir;
    assert_eq!(read(out, SAME_DAY_FILE), "Aspirin_Warfarin\n");
    assert_eq!(read(out, PLUS_48H_FILE), "Aspirin_Warfarin\n");
    // 10:00 to 01:00 next day is 15h, 08:00 to 01:00 is 17h.
    assert_eq!(read(out, WITHIN_6H_FILE), "");
    assert_eq!(
        read(out, INTERACTIONS_FILE),
        "aspirin_warfarin\tincreases bleeding risk\n"
    );
    assert!(read(out, TIMELINE_FILE).contains("<medication name=\"Heparin\"/>"));

    let combinations = result.combinations.unwrap();
    assert_eq!(combinations.patients, 1);
    assert_eq!(combinations.events, 3);
    assert_eq!(combinations.skipped_rows, 1);
    let same_day = combinations
        .windows
        .iter()
        .find(|w| w.bucket == WindowBucket::SameDay)
        .unwrap();
    assert_eq!(same_day.pairs, 1);

    let interactions = result.interactions.unwrap();
    assert_eq!(interactions.interactions, 1);
    assert_eq!(interactions.not_found, vec!["unknownium".to_string()]);
}

#[test]
fn missing_profile_keeps_combination_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = write_inputs(dir.path());
    options.profile = dir.path().join("absent.txt");

    let result = run(&options);
    assert!(result.has_errors);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("interactions:"));
    assert!(result.interactions.is_none());
    assert!(result.combinations.is_some());
    assert_eq!(read(&options.output_dir, SAME_DAY_FILE), "Aspirin_Warfarin\n");
    assert!(!options.output_dir.join(INTERACTIONS_FILE).exists());
}

#[test]
fn missing_events_keep_interaction_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = write_inputs(dir.path());
    options.events = EventSource::from_path(dir.path().join("absent.csv"));

    let result = run(&options);
    assert!(result.has_errors);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("combinations:"));
    assert!(result.combinations.is_none());
    assert_eq!(result.interactions.unwrap().interactions, 1);
    assert_eq!(
        read(&options.output_dir, INTERACTIONS_FILE),
        "aspirin_warfarin\tincreases bleeding risk\n"
    );
    for name in [SAME_DAY_FILE, PLUS_48H_FILE, WITHIN_6H_FILE, TIMELINE_FILE] {
        assert!(!options.output_dir.join(name).exists(), "{name}");
    }
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = write_inputs(dir.path());
    options.dry_run = true;

    let result = run(&options);
    assert!(!result.has_errors);
    assert!(!options.output_dir.exists());
    let combinations = result.combinations.unwrap();
    assert!(combinations.timeline.is_none());
    assert!(combinations.windows.iter().all(|w| w.output.is_none()));
    assert!(result.interactions.unwrap().output.is_none());
}

#[test]
fn tree_from_a_previous_run_reproduces_the_lists() {
    let dir = tempfile::tempdir().unwrap();
    let options = write_inputs(dir.path());
    assert!(!run(&options).has_errors);

    let second = RunOptions {
        events: EventSource::from_path(options.output_dir.join(TIMELINE_FILE)),
        output_dir: dir.path().join("again"),
        write_tree: false,
        ..options.clone()
    };
    let result = run(&second);
    assert!(!result.has_errors, "{:?}", result.errors);
    assert_eq!(result.combinations.unwrap().skipped_rows, 0);
    for name in [SAME_DAY_FILE, PLUS_48H_FILE, WITHIN_6H_FILE] {
        assert_eq!(read(&options.output_dir, name), read(&second.output_dir, name));
    }
    assert!(!second.output_dir.join(TIMELINE_FILE).exists());
}
