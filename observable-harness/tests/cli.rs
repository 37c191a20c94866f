use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

fn harness() -> Command {
  let mut cmd = Command::cargo_bin("observable-harness").unwrap();
  cmd.arg("--no-color");
  cmd
}

#[test]
fn reference_candidate_passes_and_writes_report() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("reports").join("r.json");

  harness()
    .args(["--candidate", "reference", "--json"])
    .arg(&path)
    .assert()
    .success()
    .stdout(predicate::str::contains("Beginning Tests"))
    .stdout(predicate::str::contains("All Passed"));

  let report: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
  assert_eq!(report["schema_version"], 1);
  assert_eq!(report["summary"]["all_passed"], true);
  assert_eq!(report["summary"]["failed"], 0);
  assert_eq!(report["results"].as_array().map(Vec::len), Some(27));
  assert_eq!(report["results"][0]["name"], "Example Echo Single");
}

#[test]
fn starter_workbook_fails_by_default() {
  harness()
    .assert()
    .code(1)
    .stdout(predicate::str::contains("Example Echo Single: true"))
    .stdout(predicate::str::contains("Multiply Numbers: false"))
    .stdout(predicate::str::contains("Attention Required"));
}

#[test]
fn fail_on_none_keeps_exit_status_zero() {
  harness()
    .args(["--fail-on", "none"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Attention Required"));
}

#[test]
fn json_to_stdout_moves_console_report_to_stderr() {
  let output = harness()
    .args(["--candidate", "reference", "--exercise", "twins", "--json", "-"])
    .assert()
    .success()
    .stderr(predicate::str::contains("Twins 5: true"))
    .get_output()
    .stdout
    .clone();

  let report: Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(report["summary"]["total"], 5);
  assert_eq!(report["summary"]["passed"], 5);
}

#[test]
fn exercise_selection_limits_the_run() {
  let assert = harness()
    .args(["--candidate", "reference", "--exercise", "aesop"])
    .assert()
    .success();
  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  assert!(stdout.contains("Aesop 1: true"), "{stdout}");
  assert!(stdout.contains("Aesop 2: true"), "{stdout}");
  assert!(!stdout.contains("Twins"), "{stdout}");
}

#[test]
fn unknown_exercise_is_rejected() {
  harness()
    .args(["--exercise", "hurdles"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("hurdles"));
}
