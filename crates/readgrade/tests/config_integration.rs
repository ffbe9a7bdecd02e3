//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` and `score --json` to assert actual values, not just
//! process success.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DENSE: &str = "The implementation of the comprehensive organizational restructuring \
                     initiative necessitated the establishment of interdepartmental \
                     communication protocols.";

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    for var in [
        "READGRADE_TARGET_GRADE",
        "READGRADE_MAX_GRADE",
        "READGRADE_COLOR_MODE",
        "READGRADE_HIGHLIGHT_BY",
        "READGRADE_LOG_LEVEL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join(".git")).unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert!(json["config"]["config_file"].is_null());
    assert!(json["config"]["max_grade"].is_null());
    assert_eq!(json["config"]["highlight_by"], "sentence");
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readgrade.toml"), "max_grade = 10\n").unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["max_grade"], 10.0);
    assert!(
        json["config"]["config_file"]
            .as_str()
            .unwrap()
            .ends_with(".readgrade.toml")
    );
    // With only a max, the target falls back to it.
    assert_eq!(json["effective"]["target_grade"], 10.0);
}

#[test]
fn discovers_config_in_parent_dir() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("docs").join("leaflets");
    fs::create_dir_all(&nested).unwrap();
    fs::write(tmp.path().join("readgrade.yaml"), "target_grade: 6\n").unwrap();

    let json = info_json(&nested);
    assert_eq!(json["config"]["target_grade"], 6.0);
    assert_eq!(json["effective"]["too_easy_grade"], 4.0);
}

#[test]
fn json_config_is_parsed() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("readgrade.json"),
        r#"{"color_mode": "clear", "highlight_by": "paragraph"}"#,
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["color_mode"], "clear");
    assert_eq!(json["config"]["highlight_by"], "paragraph");
}

#[test]
fn explicit_config_flag_wins() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readgrade.toml"), "max_grade = 12\n").unwrap();
    let strict = tmp.path().join("strict.toml");
    fs::write(&strict, "max_grade = 8\n").unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            strict.to_str().unwrap(),
            "info",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["max_grade"], 8.0);
}

#[test]
fn env_var_overrides_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readgrade.toml"), "max_grade = 12\n").unwrap();

    let output = cmd()
        .env("READGRADE_MAX_GRADE", "9")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["max_grade"], 9.0);
}

#[test]
fn invalid_config_reports_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readgrade.toml"), "color_mode = \"neon\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

// =============================================================================
// Config Drives Commands
// =============================================================================

#[test]
fn config_max_grade_fails_score() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readgrade.toml"), "max_grade = 11\n").unwrap();
    fs::write(tmp.path().join("dense.txt"), DENSE).unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "score", "dense.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("less than or equal to 11"));
}

#[test]
fn flag_overrides_config_max_grade() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readgrade.toml"), "max_grade = 11\n").unwrap();
    fs::write(tmp.path().join("dense.txt"), DENSE).unwrap();

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "score",
            "dense.txt",
            "--max-grade",
            "40",
        ])
        .assert()
        .success();
}

#[test]
fn config_highlight_by_is_default_unit() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".readgrade.toml"),
        "highlight_by = \"paragraph\"\n",
    )
    .unwrap();
    fs::write(tmp.path().join("text.txt"), "One. Two.\n\nThree.").unwrap();

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "highlight", "text.txt", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["highlight_by"], "paragraph");
    assert_eq!(json["units"].as_array().unwrap().len(), 2);
}
