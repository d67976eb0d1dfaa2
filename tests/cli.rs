use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn tt(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tt").expect("binary");
    cmd.env_remove("TASK_TRACKER_DIR")
        .arg("--data-dir")
        .arg(dir.path());
    cmd
}

fn stored(dir: &TempDir) -> serde_json::Value {
    let raw = fs::read_to_string(dir.path().join("tasks.json")).expect("tasks.json");
    serde_json::from_str(&raw).expect("valid json")
}

fn ids(dir: &TempDir) -> Vec<u64> {
    stored(dir)
        .as_array()
        .expect("array")
        .iter()
        .map(|t| t["id"].as_u64().expect("numeric id"))
        .collect()
}

#[test]
fn help_works() {
    Command::cargo_bin("tt")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("due dates"));
}

#[test]
fn add_list_and_sort() {
    let dir = tempfile::tempdir().unwrap();
    tt(&dir)
        .args(["add", "Buy milk", "--due", "2024-01-10"])
        .assert()
        .success()
        .stdout(contains("Added task"));
    tt(&dir)
        .args(["add", "Pay rent", "--due", "2024-01-01"])
        .assert()
        .success();

    tt(&dir).arg("sort").assert().success();

    let names: Vec<String> = stored(&dir)
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Pay rent", "Buy milk"]);

    let out = tt(&dir).arg("list").assert().success().get_output().stdout.clone();
    let out = String::from_utf8(out).unwrap();
    let rent = out.find("Pay rent").expect("listed");
    let milk = out.find("Buy milk").expect("listed");
    assert!(rent < milk);
}

#[test]
fn blob_uses_stored_attribute_names() {
    let dir = tempfile::tempdir().unwrap();
    tt(&dir)
        .args(["add", "Call mom", "--due", "2024-03-05"])
        .assert()
        .success();
    let task = &stored(&dir)[0];
    assert_eq!(task["name"], "Call mom");
    assert_eq!(task["dueDate"], "2024-03-05");
    assert_eq!(task["completed"], false);
}

#[test]
fn toggle_then_filter_pending() {
    let dir = tempfile::tempdir().unwrap();
    tt(&dir).args(["add", "First", "--due", "2024-02-01"]).assert().success();
    tt(&dir).args(["add", "Second", "--due", "2024-02-02"]).assert().success();
    let first = ids(&dir)[0];

    tt(&dir)
        .args(["toggle", &first.to_string()])
        .assert()
        .success()
        .stdout(contains("completed"));

    tt(&dir)
        .args(["list", "--filter", "pending"])
        .assert()
        .success()
        .stdout(contains("Second").and(contains("First").not()));
    tt(&dir)
        .args(["list", "--filter", "completed"])
        .assert()
        .success()
        .stdout(contains("First").and(contains("Second").not()));
}

#[test]
fn delete_leaves_empty_blob() {
    let dir = tempfile::tempdir().unwrap();
    tt(&dir).args(["add", "Call mom", "--due", "2024-03-05"]).assert().success();
    let id = ids(&dir)[0];
    tt(&dir).args(["delete", &id.to_string()]).assert().success();
    assert_eq!(stored(&dir), serde_json::json!([]));
    tt(&dir).arg("list").assert().success().stdout(contains("No tasks"));
}

#[test]
fn unknown_id_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    tt(&dir)
        .args(["toggle", "12345"])
        .assert()
        .success()
        .stdout(contains("nothing changed"));
    tt(&dir).args(["delete", "12345"]).assert().success();
}

#[test]
fn blank_name_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    tt(&dir)
        .args(["add", "  ", "--due", "2024-01-01"])
        .assert()
        .code(2)
        .stderr(contains("Both fields are required!"));
    assert!(!dir.path().join("tasks.json").exists());
}

#[test]
fn bad_date_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    tt(&dir)
        .args(["add", "Taxes", "--due", "whenever"])
        .assert()
        .code(2)
        .stderr(contains("Unrecognised due date"));
}

#[test]
fn corrupt_store_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tasks.json"), "{ not json").unwrap();
    tt(&dir).arg("list").assert().success().stdout(contains("No tasks"));
    tt(&dir).args(["add", "Fresh", "--due", "today"]).assert().success();
    assert_eq!(ids(&dir).len(), 1);
}

#[test]
fn completions_are_generated() {
    Command::cargo_bin("tt")
        .expect("binary")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("tt"));
}
