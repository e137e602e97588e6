//! Integration tests for the slipway CLI surface.
//!
//! These tests spawn the actual binary and stay offline: argument parsing,
//! help, version, and the failure paths that stop before any network use.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn slipway() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("slipway"));
    cmd.env("NO_COLOR", "1");
    // Pin everything the binary reads from the environment so ambient
    // values on the test machine cannot leak in.
    cmd.env_remove("CI");
    cmd.env_remove("SLIPWAY_YES");
    cmd.env_remove("SLIPWAY_PASSWORD");
    cmd.env("SLIPWAY_CONFIG", "/nonexistent/slipway.yaml");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    slipway().assert().code(2).stderr(predicate::str::contains(
        "Provision and bootstrap sites",
    ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    slipway()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    slipway()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("slipway"));
}

#[test]
fn test_version_command_shows_version() {
    slipway()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("slipway 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let assert = slipway().args(["version", "--json"]).assert().success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is one JSON object");
    assert_eq!(value["version"], "0.1.0");
}

// --- Command hierarchy tests ---

#[test]
fn test_help_shows_provision_command() {
    slipway()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("provision"));
}

#[test]
fn test_help_shows_teardown_command() {
    slipway()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("teardown"));
}

#[test]
fn test_help_shows_bootstrap_git_command() {
    slipway()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bootstrap-git"));
}

#[test]
fn test_help_shows_apps_command() {
    slipway()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apps"));
}

#[test]
fn test_help_shows_websites_command() {
    slipway()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("websites"));
}

#[test]
fn test_help_shows_methods_command() {
    slipway()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("methods"));
}

#[test]
fn test_help_shows_check_command() {
    slipway()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_help_shows_init_and_link_commands() {
    slipway()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("link"));
}

#[test]
fn test_help_shows_config_command() {
    slipway()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"));
}

// --- Global flags tests ---

#[test]
fn test_global_json_flag_accepted() {
    slipway()
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version":"#));
}

#[test]
fn test_quiet_suppresses_version_output() {
    slipway()
        .args(["--quiet", "version"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_json_output_survives_quiet() {
    // --quiet silences human chatter but never the JSON result object
    let assert = slipway()
        .args(["--json", "--quiet", "version"])
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is one JSON object");
    assert_eq!(value["version"], "0.1.0");
}

#[test]
fn test_global_no_color_flag_accepted() {
    slipway().args(["--no-color", "version"]).assert().success();
}

#[test]
fn test_global_yes_flag_accepted() {
    slipway().args(["--yes", "version"]).assert().success();
}

#[test]
fn test_no_color_env_var_accepted() {
    // NO_COLOR env var should be accepted with any truthy value
    slipway()
        .env("NO_COLOR", "true")
        .arg("version")
        .assert()
        .success();
}

// --- Error handling tests ---

#[test]
fn test_unknown_command_exits_with_error() {
    slipway()
        .arg("nonexistent")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_provision_without_settings_fails_fast() {
    // No settings file: validation stops the run before any network use.
    slipway()
        .arg("provision")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Required setting 'username'"));
}

#[test]
fn test_link_without_settings_fails_fast() {
    slipway()
        .arg("link")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Required setting 'username'"));
}

#[test]
fn test_json_mode_reports_errors_as_json_on_stdout() {
    let assert = slipway()
        .args(["--json", "apps", "ensure", "9bad", "--kind", "static"])
        .assert()
        .code(1)
        .stderr(predicate::str::is_empty());
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is one JSON object");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "config");
    assert!(
        value["message"]
            .as_str()
            .expect("message is a string")
            .contains("9bad")
    );
}

// --- Confirmation flow tests ---

#[test]
fn test_teardown_aborts_on_declined_confirmation() {
    // Under CI the prompt takes its default answer (no), so teardown stops
    // before touching the account.
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("slipway.yaml");
    std::fs::write(
        &path,
        "username: alice\npassword: pw\nproject:\n  name: blog\n",
    )
    .expect("write settings");

    slipway()
        .env("SLIPWAY_CONFIG", &path)
        .env("CI", "1")
        .arg("teardown")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));
}
