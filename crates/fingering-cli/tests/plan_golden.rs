use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn plan_text_reports_scale_segment_and_full_coverage() {
    let mut cmd = cargo_bin_cmd!("fingering-cli");
    cmd.args([
        "plan",
        "--notes",
        "tests/fixtures/c_major_scale.json",
        "--difficulty",
        "intermediate",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("8 notes"))
        .stdout(predicate::str::contains("Scale"))
        .stdout(predicate::str::contains("finger 1"));
}

#[test]
fn plan_json_is_well_formed_and_covers_every_note() {
    let mut cmd = cargo_bin_cmd!("fingering-cli");
    cmd.args([
        "--format",
        "json",
        "plan",
        "--notes",
        "tests/fixtures/c_major_scale.json",
        "--difficulty",
        "advanced",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON output");
    assert_eq!(parsed["note_count"], 8);
    assert_eq!(parsed["fingerings"].as_array().unwrap().len(), 8);
}

#[test]
fn plan_rejects_missing_notes_file() {
    let mut cmd = cargo_bin_cmd!("fingering-cli");
    cmd.args(["plan", "--notes", "tests/fixtures/does_not_exist.json"]);
    cmd.assert().failure();
}
