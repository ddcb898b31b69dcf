//! Integration tests for the bmi binary.
//!
//! These tests verify end-to-end behavior including:
//! - Calculation and solving commands
//! - Clamping and rejection of edits
//! - The interactive edit session
//! - Dark-mode preference persistence

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test directory holding config and data
fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("config.toml"), "").expect("Failed to write config");
    temp_dir
}

/// Helper to get the CLI binary wired to an isolated config and data dir
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bmi"));
    cmd.arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--data-dir")
        .arg(dir.join("data"))
        .env_remove("APP_NAME")
        .env_remove("APP_VERSION")
        .env_remove("APP_ENV");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("Failed to run bmi");
    assert!(output.status.success(), "bmi failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("Invalid JSON output")
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Body Mass Index calculator"));
}

#[test]
fn test_default_command_shows_defaults() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI:    22.9  (derived)"))
        .stdout(predicate::str::contains("Category: Normal weight (18.5 - 24.9)"));
}

#[test]
fn test_calc_normal_weight() {
    let temp_dir = setup_test_dir();
    let json = json_output(
        cli(temp_dir.path()).args(["calc", "--weight", "70", "--height", "175", "--json"]),
    );

    let bmi = json["bmi"].as_f64().unwrap();
    assert!((bmi - 22.86).abs() < 0.01);
    assert_eq!(json["category_name"], "Normal weight");
    assert_eq!(json["target"], "bmi");
}

#[test]
fn test_calc_overweight() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .args(["calc", "--weight", "85", "--height", "175"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI:    27.8"))
        .stdout(predicate::str::contains("Overweight"));
}

#[test]
fn test_calc_clamps_weight() {
    let temp_dir = setup_test_dir();

    let low = json_output(cli(temp_dir.path()).args(["calc", "--weight", "10", "--json"]));
    assert_eq!(low["weight"].as_f64().unwrap(), 30.0);

    let high = json_output(cli(temp_dir.path()).args(["calc", "--weight", "300", "--json"]));
    assert_eq!(high["weight"].as_f64().unwrap(), 200.0);
}

#[test]
fn test_solve_for_weight() {
    let temp_dir = setup_test_dir();
    let json = json_output(cli(temp_dir.path()).args([
        "solve", "--for", "weight", "--bmi", "20", "--height", "200", "--json",
    ]));

    assert!((json["weight"].as_f64().unwrap() - 80.0).abs() < 1e-9);
    assert_eq!(json["target"], "weight");
}

#[test]
fn test_solve_for_height() {
    let temp_dir = setup_test_dir();
    let json = json_output(cli(temp_dir.path()).args([
        "solve", "--for", "height", "--bmi", "25", "--weight", "100", "--json",
    ]));

    assert!((json["height"].as_f64().unwrap() - 200.0).abs() < 1e-9);
}

#[test]
fn test_solve_rejects_derived_input() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .args(["solve", "--for", "bmi", "--bmi", "30"])
        .assert()
        .failure();
}

#[test]
fn test_solve_rejects_unknown_variable() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .args(["solve", "--for", "mass"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown variable"));
}

#[test]
fn test_session_edit_flow() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("session")
        .write_stdin("click weight\ntype 85\nenter\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("editing Weight: 70.0"))
        .stdout(predicate::str::contains("bmi=27.8 target=BMI category=Overweight"));
}

#[test]
fn test_session_invalid_and_escape_revert() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("session")
        .write_stdin("click weight\ntype abc\nenter\nclick weight\ntype 999\nescape\nshow\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid input; Weight reverted to 70.0"))
        .stdout(predicate::str::contains("cancelled; Weight stays 70.0"))
        .stdout(predicate::str::contains("weight=999").not());
}

#[test]
fn test_session_blur_commits_and_clamps() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("session")
        .write_stdin("click weight\ntype 10\nblur\nclick weight\ntype 300\nclick height\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("weight=30.0"))
        .stdout(predicate::str::contains("weight=200.0"))
        .stdout(predicate::str::contains("editing Height: 175.0"));
}

#[test]
fn test_session_enter_without_typing_keeps_state() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("session")
        .write_stdin("target weight\nclick bmi\nenter\nshow\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("editing BMI: 22.9"))
        .stdout(predicate::str::contains("weight=70.0 height=175.0 bmi=22.9 target=Weight"))
        .stdout(predicate::str::contains("weight=70.1").not());
}

#[test]
fn test_session_disabled_field() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("session")
        .write_stdin("target weight\nclick weight\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weight is derived"));
}

#[test]
fn test_config_limits_applied() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[limits.weight]\nmin = 40.0\nmax = 150.0\n",
    )
    .unwrap();

    let json = json_output(cli(temp_dir.path()).args(["calc", "--weight", "10", "--json"]));
    assert_eq!(json["weight"].as_f64().unwrap(), 40.0);
}

#[test]
fn test_invalid_config_fails() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[limits.height]\nmin = 250.0\nmax = 100.0\n",
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("calc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lower bound"));
}

#[test]
fn test_theme_toggle_persists() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light (system preference)"));

    cli(temp_dir.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark (saved preference)"));

    let prefs = fs::read_to_string(temp_dir.path().join("data/preferences.json")).unwrap();
    assert!(prefs.contains("\"dark-mode\":true"));

    cli(temp_dir.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark"));

    cli(temp_dir.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light (saved preference)"));
}

#[test]
fn test_theme_follows_configured_system_preference() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[appearance]\nprefer_dark = true\n",
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark (system preference)"));
}
