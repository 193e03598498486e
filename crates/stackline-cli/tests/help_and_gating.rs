mod support;

use predicates::prelude::*;
use std::fs;

use support::{assert_timestamp_log_names, new_command_with_temp_home, write_config};

#[test]
fn root_help_lists_flags_and_doctor() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: stackline"))
        .stdout(predicate::str::contains("--diagnostics"))
        .stdout(predicate::str::contains("--no-watch"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn doctor_help_runs_without_config() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args(["doctor", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Run environment and configuration checks",
        ));
}

#[test]
fn doctor_runs_without_config() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("config parses and validates"))
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("inside a git repository"));
}

#[test]
fn doctor_reports_invalid_config_without_failing() {
    let (mut command, temp_home) = new_command_with_temp_home();
    write_config(temp_home.path(), "version = 2\n");

    command
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("FAIL"))
        .stdout(predicate::str::contains("config parses and validates"));
}

#[test]
fn unknown_subcommands_are_rejected() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn root_command_rejects_invalid_config_before_tui() {
    let (mut command, temp_home) = new_command_with_temp_home();
    write_config(temp_home.path(), "[watch]\ndebounce_ms = 0\n");

    command
        .current_dir(temp_home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config at"))
        .stderr(predicate::str::contains(".config/stackline/config.toml"));
}

#[test]
fn root_command_fails_outside_git_repo_before_tui() {
    let (mut command, temp_home) = new_command_with_temp_home();

    command
        .current_dir(temp_home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to resolve git directory"));
}

#[test]
fn doctor_with_diagnostics_creates_log_file() {
    let (mut command, temp_home) = new_command_with_temp_home();
    command
        .args(["--diagnostics", "doctor"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Diagnostics enabled:"));

    let diagnostics_dir = temp_home.path().join(".config/stackline/diagnostics");
    let logs: Vec<_> = fs::read_dir(&diagnostics_dir)
        .expect("diagnostics dir")
        .filter_map(Result::ok)
        .collect();
    assert_timestamp_log_names(&logs);

    let contents = fs::read_to_string(logs[0].path()).expect("log contents");
    assert!(contents.contains("stackline diagnostics start"));
}
