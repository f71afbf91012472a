//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the walking,
//! boarding and history subcommands through the actual binary, including
//! stdin piping, config files, output formats and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the snapshot.json fixture.
fn snapshot_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/snapshot.json")
}

/// Helper: path to a config selecting text output.
fn text_config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/text.toml")
}

/// Helper: read the snapshot fixture as a string.
fn snapshot_json() -> String {
    std::fs::read_to_string(snapshot_path()).expect("snapshot.json fixture must exist")
}

fn slots() -> Command {
    Command::cargo_bin("slots").unwrap()
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout must be valid JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// walking
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn walking_from_file_as_json() {
    let output = slots()
        .args(["walking", "--sitter", "alice", "--today", "2026-03-16"])
        .args(["-i", snapshot_path()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let slots = stdout_json(&output.stdout);
    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["formattedTime"], "9:00 AM - 5:00 PM");
    assert_eq!(slots[0]["dateKey"], "2026-03-16");
    assert_eq!(slots[1]["formattedTime"], "8:00 AM - 10:00 AM");
    assert_eq!(slots[1]["dateKey"], "2026-03-25");
}

#[test]
fn walking_from_stdin_as_text() {
    slots()
        .args(["walking", "--sitter", "alice", "--today", "2026-03-16", "--format", "text"])
        .write_stdin(snapshot_json())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Monday, Mar 16, 2026  9:00 AM - 5:00 PM",
        ))
        .stdout(predicate::str::contains(
            "Wednesday, Mar 25, 2026  8:00 AM - 10:00 AM",
        ))
        .stdout(predicate::str::contains("Mar 18").not())
        .stdout(predicate::str::contains("Mar 23").not());
}

#[test]
fn walking_split_keeps_free_parts() {
    slots()
        .args(["walking", "--sitter", "alice", "--today", "2026-03-16", "--split"])
        .args(["--format", "text", "-i", snapshot_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Monday, Mar 23, 2026  9:00 AM - 10:00 AM",
        ))
        .stdout(predicate::str::contains(
            "Monday, Mar 23, 2026  11:00 AM - 5:00 PM",
        ));
}

#[test]
fn unknown_sitter_has_no_slots() {
    slots()
        .args(["walking", "--sitter", "carol", "--today", "2026-03-16", "--format", "text"])
        .args(["-i", snapshot_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No available slots"));
}

#[test]
fn walking_without_today_uses_the_clock() {
    slots()
        .args(["walking", "--sitter", "alice", "--timezone", "Asia/Tokyo"])
        .args(["-i", snapshot_path()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
}

// ─────────────────────────────────────────────────────────────────────────────
// boarding
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn boarding_shows_remaining_spots() {
    slots()
        .args(["boarding", "--sitter", "alice", "--format", "text", "-i", snapshot_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Friday, Mar 20, 2026  Overnight Stay - $45/night (1 spot left)",
        ))
        .stdout(predicate::str::contains(
            "Saturday, Mar 21, 2026  Overnight Stay - $45/night (2 spots left)",
        ));
}

#[test]
fn boarding_without_capacity_fails() {
    slots()
        .args(["boarding", "--sitter", "bob", "-i", snapshot_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to compute boarding slots for bob"))
        .stderr(predicate::str::contains("No boarding capacity on record"));
}

// ─────────────────────────────────────────────────────────────────────────────
// history
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn history_splits_bookings() {
    let output = slots()
        .args(["history", "--sitter", "alice", "--today", "2026-03-16"])
        .args(["-i", snapshot_path()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let lists = stdout_json(&output.stdout);
    assert_eq!(lists["upcoming"][0]["date"], "2026-03-23");
    assert_eq!(lists["history"][0]["date"], "2026-03-09");
    assert_eq!(lists["history"][0]["status"], "completed");
}

#[test]
fn history_as_text() {
    slots()
        .args(["history", "--sitter", "alice", "--today", "2026-03-16", "--format", "text"])
        .args(["-i", snapshot_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upcoming:\n  2026-03-23 10:00-11:00 confirmed"))
        .stdout(predicate::str::contains("History:\n  2026-03-09 10:00-11:00 completed"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Config and errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn config_file_selects_text_format() {
    slots()
        .args(["boarding", "--sitter", "alice", "-i", snapshot_path()])
        .args(["--config", text_config_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overnight Stay"))
        .stdout(predicate::str::starts_with("[").not());
}

#[test]
fn format_flag_overrides_config_file() {
    slots()
        .args(["boarding", "--sitter", "alice", "-i", snapshot_path()])
        .args(["--config", text_config_path(), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn invalid_today_is_rejected() {
    slots()
        .args(["walking", "--sitter", "alice", "--today", "someday", "-i", snapshot_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --today date"));
}

#[test]
fn invalid_timezone_is_rejected() {
    slots()
        .args(["walking", "--sitter", "alice", "--timezone", "Mars/Base"])
        .args(["-i", snapshot_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone: Mars/Base"));
}

#[test]
fn malformed_snapshot_is_rejected() {
    slots()
        .args(["walking", "--sitter", "alice", "--today", "2026-03-16"])
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse sitter snapshot"));
}

#[test]
fn missing_input_file_is_rejected() {
    slots()
        .args(["boarding", "--sitter", "alice", "-i", "/nonexistent/snapshot.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn sitter_is_required() {
    slots()
        .args(["walking", "-i", snapshot_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--sitter"));
}
