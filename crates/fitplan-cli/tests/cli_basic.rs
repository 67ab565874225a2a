//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary home
//! directory so config files never leak between tests.

mod common;

use common::{run_cli, run_json};

#[test]
fn test_week_number() {
    let home = tempfile::tempdir().unwrap();
    let out = run_json(home.path(), &["calendar", "week-number", "2024-01-15"]);
    assert_eq!(out["week"], 3);

    let out = run_json(home.path(), &["calendar", "week-number", "2021-01-03"]);
    assert_eq!(out["week"], 53);
}

#[test]
fn test_week_start() {
    let home = tempfile::tempdir().unwrap();
    let out = run_json(home.path(), &["calendar", "week-start", "2024-01-21"]);
    assert_eq!(out["weekStart"], "2024-01-15");
}

#[test]
fn test_month_grid() {
    let home = tempfile::tempdir().unwrap();
    let out = run_json(
        home.path(),
        &["calendar", "month-grid", "--year", "2024", "--month", "2"],
    );
    assert_eq!(out["month"], "2024-02");
    assert_eq!(out["first"], "2024-01-29");
    assert_eq!(out["rows"].as_array().unwrap().len(), 6);
    assert_eq!(out["rows"][0][3], "2024-02-01");
}

#[test]
fn test_month_grid_rejects_bad_month() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(
        home.path(),
        &["calendar", "month-grid", "--year", "2024", "--month", "13"],
    );
    assert_ne!(code, 0);
}

#[test]
fn test_window_show() {
    let home = tempfile::tempdir().unwrap();
    let out = run_json(home.path(), &["window", "show", "--today", "2024-01-15"]);
    assert_eq!(out["len"], 35);
    assert_eq!(out["todayIndex"], 14);
    let days = out["days"].as_array().unwrap();
    assert_eq!(days[14]["isToday"], true);
    assert_eq!(days[0]["day"]["date"], "2024-01-01");
    // Wednesday is a rest day by default.
    assert_eq!(days[16]["day"]["isRestDay"], true);
}

#[test]
fn test_window_show_custom_span() {
    let home = tempfile::tempdir().unwrap();
    let out = run_json(
        home.path(),
        &["window", "show", "--today", "2024-01-15", "--before", "3", "--after", "3"],
    );
    assert_eq!(out["len"], 7);
    assert_eq!(out["todayIndex"], 3);
}

#[test]
fn test_simulate_swipe_commits_next_day() {
    let home = tempfile::tempdir().unwrap();
    let out = run_json(
        home.path(),
        &[
            "simulate",
            "swipe",
            "--translation=-150",
            "--velocity=-700",
            "--width",
            "375",
            "--today",
            "2024-01-15",
        ],
    );
    assert_eq!(out["release"]["phase"], "committing");
    assert_eq!(out["dayIndex"], 15);
    assert_eq!(out["selectedDate"], "2024-01-16");
    assert_eq!(out["weekIndex"], 2);
    assert_eq!(out["haptics"], 1);
}

#[test]
fn test_simulate_short_swipe_snaps_back() {
    let home = tempfile::tempdir().unwrap();
    let out = run_json(
        home.path(),
        &[
            "simulate",
            "swipe",
            "--translation=-40",
            "--velocity=-100",
            "--today",
            "2024-01-15",
        ],
    );
    assert_eq!(out["release"]["phase"], "snapping_back");
    assert_eq!(out["dayIndex"], 14);
    assert_eq!(out["haptics"], 0);
}

#[test]
fn test_simulate_select_syncs_both_strips() {
    let home = tempfile::tempdir().unwrap();
    let out = run_json(
        home.path(),
        &["simulate", "select", "2024-01-22", "--today", "2024-01-15"],
    );
    assert_eq!(out["dayIndex"], 21);
    assert_eq!(out["weekIndex"], 3);
    assert_eq!(out["mainWeekIndex"], 3);
    assert_eq!(out["stickyWeekIndex"], 3);
    assert_eq!(out["haptics"], 1);
}

#[test]
fn test_simulate_select_outside_window() {
    let home = tempfile::tempdir().unwrap();
    let out = run_json(
        home.path(),
        &["simulate", "select", "2024-03-12", "--today", "2024-01-15"],
    );
    assert!(out["dayIndex"].is_null());
    assert_eq!(out["selectedDate"], "2024-03-12");
    assert_eq!(out["weekIndex"], 2);
}

#[test]
fn test_config_roundtrip() {
    let home = tempfile::tempdir().unwrap();
    let out = run_json(home.path(), &["config", "get", "window.days_before"]);
    assert_eq!(out["value"], "14");

    run_json(home.path(), &["config", "set", "window.days_before", "7"]);
    let out = run_json(home.path(), &["config", "get", "window.days_before"]);
    assert_eq!(out["value"], "7");
    assert!(home.path().join(".config/fitplan/config.toml").exists());

    let out = run_json(home.path(), &["window", "show", "--today", "2024-01-15"]);
    assert_eq!(out["todayIndex"], 7);

    run_json(home.path(), &["config", "reset"]);
    let out = run_json(home.path(), &["config", "list"]);
    assert_eq!(out["window"]["days_before"], 14);
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(home.path(), &["config", "get", "window.nope"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("unknown key"));

    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "window.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key"));
}
