//! Integration tests for `slipway config`.
//!
//! Each test pins `SLIPWAY_CONFIG` to a file inside its own temp dir, so
//! runs never touch a real settings file and never race each other.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn slipway(config_path: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("slipway"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("CI");
    cmd.env_remove("SLIPWAY_YES");
    cmd.env_remove("SLIPWAY_PASSWORD");
    cmd.env("SLIPWAY_CONFIG", config_path);
    cmd
}

fn temp_config() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("slipway.yaml");
    (dir, path)
}

// --- config path ---

#[test]
fn test_config_path_honours_env_override() {
    let (_dir, path) = temp_config();
    slipway(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path.display().to_string()));
}

// --- config show ---

#[test]
fn test_config_show_renders_defaults_without_file() {
    let (_dir, path) = temp_config();
    slipway(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings file:"))
        .stdout(predicate::str::contains("Password:"))
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn test_config_show_reads_settings_file() {
    let (_dir, path) = temp_config();
    std::fs::write(
        &path,
        "username: alice\npassword: pw\nproject:\n  name: blog\n",
    )
    .expect("write settings");
    slipway(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("blog_static"));
}

#[test]
fn test_config_show_json_redacts_password() {
    let (_dir, path) = temp_config();
    std::fs::write(
        &path,
        "username: alice\npassword: hunter2\nproject:\n  name: blog\n",
    )
    .expect("write settings");
    let assert = slipway(&path)
        .args(["config", "show", "--json"])
        .assert()
        .success();
    let stdout = &assert.get_output().stdout;
    let value: serde_json::Value =
        serde_json::from_slice(stdout).expect("stdout is one JSON object");
    assert_eq!(value["username"], "alice");
    assert_eq!(value["password_set"], true);
    assert_eq!(value["apps"]["main"]["name"], "blog");
    // The literal password never reaches stdout.
    assert!(!String::from_utf8_lossy(stdout).contains("hunter2"));
}

#[test]
fn test_password_env_var_marks_password_set() {
    let (_dir, path) = temp_config();
    std::fs::write(&path, "username: alice\n").expect("write settings");
    let assert = slipway(&path)
        .env("SLIPWAY_PASSWORD", "from-env")
        .args(["config", "show", "--json"])
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is one JSON object");
    assert_eq!(value["password_set"], true);
}

// --- config init ---

#[test]
fn test_config_init_writes_commented_sample() {
    let (_dir, path) = temp_config();
    slipway(&path)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    let written = std::fs::read_to_string(&path).expect("sample file");
    assert!(written.starts_with("# Slipway settings"));
    assert!(written.contains("username:"));
}

#[test]
fn test_config_init_keeps_existing_file_when_declined() {
    let (_dir, path) = temp_config();
    std::fs::write(&path, "username: alice\n").expect("write settings");
    // Under CI the overwrite prompt takes its default answer (no).
    slipway(&path)
        .env("CI", "1")
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keeping the existing file."));
    let kept = std::fs::read_to_string(&path).expect("settings file");
    assert_eq!(kept, "username: alice\n");
}

#[test]
fn test_config_init_overwrites_with_yes_flag() {
    let (_dir, path) = temp_config();
    std::fs::write(&path, "username: alice\n").expect("write settings");
    slipway(&path)
        .args(["config", "init", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    let written = std::fs::read_to_string(&path).expect("sample file");
    assert!(written.starts_with("# Slipway settings"));
}
