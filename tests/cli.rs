//! End-to-end runs of the command-line tool

use boost_events::{
    records::{Collection, Event, EventReader, EventWriter, McParticle, MC_PARTICLE},
    rewrite::output_path_for,
};
use std::{
    fs,
    path::Path,
    process::{Command, Output},
};
use tempfile::TempDir;

fn run<I, S>(dir: &Path, args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_boost_events"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to run boost_events")
}

fn write_events(path: &Path, num_events: i32) {
    let mut writer = EventWriter::create_new(path).unwrap();
    for event_number in 0..num_events {
        let mut electron = McParticle::new(11, [1., 0., 45.], 0.000511);
        electron.generator_status = 1;
        writer
            .write_event(&Event {
                event_number,
                collections: vec![Collection::particles(MC_PARTICLE, vec![electron])],
                ..Event::default()
            })
            .unwrap();
    }
    writer.finish().unwrap();
}

fn count_events(path: &Path) -> usize {
    EventReader::open(path).unwrap().event_count().unwrap()
}

fn dir_entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn no_arguments_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), Vec::<&str>::new());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "no usage message in {stderr:?}");
    assert_eq!(dir_entries(dir.path()), 0);
}

#[test]
fn help_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), ["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("INPUT_FILE"));
}

#[test]
fn files_are_boosted() {
    let dir = TempDir::new().unwrap();
    write_events(&dir.path().join("a.slcio"), 3);
    write_events(&dir.path().join("b.slcio"), 2);

    let output = run(dir.path(), ["a.slcio", "b.slcio"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(count_events(&dir.path().join("a-boosted.slcio")), 3);
    assert_eq!(count_events(&dir.path().join("b-boosted.slcio")), 2);

    let mut reader = EventReader::open(dir.path().join("a-boosted.slcio")).unwrap();
    let event = reader.read_next_event().unwrap().unwrap();
    let electron = event.particles(MC_PARTICLE).next().unwrap();
    assert_eq!(electron.momentum()[0], 1.);
    assert!(electron.momentum()[2] > 45.);
}

#[test]
fn existing_outputs_fail_the_run() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("run.slcio");
    write_events(&input, 1);
    let existing = output_path_for(&input);
    fs::write(&existing, "keep me").unwrap();

    let output = run(dir.path(), ["run.slcio"]);
    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&existing).unwrap(), "keep me");

    // The cause is reported once, by the final error report
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("refusing to overwrite").count(), 1, "{stderr}");
    assert!(stderr.contains("skipping 0 remaining file(s)"), "{stderr}");
}

#[test]
fn first_failure_stops_the_run() {
    let dir = TempDir::new().unwrap();
    write_events(&dir.path().join("a.slcio"), 1);
    write_events(&dir.path().join("c.slcio"), 1);

    let output = run(dir.path(), ["a.slcio", "missing.slcio", "c.slcio"]);
    assert!(!output.status.success());
    assert!(dir.path().join("a-boosted.slcio").exists());
    assert!(!dir.path().join("missing-boosted.slcio").exists());
    assert!(!dir.path().join("c-boosted.slcio").exists());
}
