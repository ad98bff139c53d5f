//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary home directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_deskhealth"))
        .args(args)
        .env("HOME", home)
        .env_remove("DESKHEALTH_ENV")
        .env_remove("DESKHEALTH_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_config_defaults_and_set() {
    let home = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(home.path(), &["config", "get", "timer.work_duration_min"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "45");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.work_duration_min", "30"]);
    assert_eq!(code, 0);
    let (out, _, _) = run_cli(home.path(), &["config", "get", "timer.work_duration_min"]);
    assert_eq!(out.trim(), "30");

    assert!(home
        .path()
        .join(".config/deskhealth/config.toml")
        .exists());
}

#[test]
fn test_config_rejects_inverted_window() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "work_schedule.start", "18:00"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));

    let (out, _, _) = run_cli(home.path(), &["config", "get", "work_schedule.start"]);
    assert_eq!(out.trim(), "09:00");
}

#[test]
fn test_config_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "get", "timer.nope"]);
    assert_eq!(code, 1);
}

#[test]
fn test_log_feeds_stats() {
    let home = tempfile::tempdir().unwrap();
    let empty = run_json(home.path(), &["stats", "today"]);
    assert_eq!(empty["current_streak"], 0);

    run_json(home.path(), &["log", "exercise"]);
    let day = run_json(home.path(), &["log", "focus", "20"]);
    assert_eq!(day["exercisesCompleted"], 1);
    assert_eq!(day["minutesFocused"], 20);

    let stats = run_json(home.path(), &["stats", "today"]);
    assert_eq!(stats["today"]["exercisesCompleted"], 1);
    assert_eq!(stats["current_streak"], 1);
    assert_eq!(stats["best_streak"], 1);

    let streak = run_json(home.path(), &["stats", "streak"]);
    assert_eq!(streak["total_exercises"], 1);
    assert_eq!(streak["total_minutes_focused"], 20);

    let history = run_json(home.path(), &["stats", "history", "--days", "3"]);
    assert_eq!(history.as_array().unwrap().len(), 3);
}

#[test]
fn test_exercise_catalogue_edits() {
    let home = tempfile::tempdir().unwrap();
    let added = run_json(home.path(), &["exercise", "add", "Calf Raises", "--category", "strength"]);
    let id = added["id"].as_str().unwrap().to_string();
    assert_eq!(added["custom"], true);

    let list = run_json(home.path(), &["exercise", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 8);

    let (out, _, code) = run_cli(home.path(), &["exercise", "toggle", "1"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "1: disabled");
    let next = run_json(home.path(), &["exercise", "next"]);
    assert_eq!(next["id"], "2");

    let (_, _, code) = run_cli(home.path(), &["exercise", "update", "1", "--name", "X"]);
    assert_eq!(code, 1);

    let (_, _, code) = run_cli(home.path(), &["exercise", "remove", &id]);
    assert_eq!(code, 0);
    let list = run_json(home.path(), &["exercise", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 7);
}

#[test]
fn test_schedule_check() {
    let home = tempfile::tempdir().unwrap();
    let lunch = run_json(home.path(), &["schedule", "check", "--at", "12:30"]);
    assert_eq!(lunch["off_duty"], false);
    assert_eq!(lunch["meal_time"], true);

    let evening = run_json(home.path(), &["schedule", "check", "--at", "17:00"]);
    assert_eq!(evening["off_duty"], true);
    assert_eq!(evening["meal_time"], false);
}
