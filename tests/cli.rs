//! CLI integration tests.
//!
//! Covers the offline surface (decode, completions, config errors); rotation
//! against real Azure is exercised manually, not here.

use assert_cmd::Command;
use predicates::prelude::*;

fn keywheel() -> Command {
    let mut cmd = Command::cargo_bin("keywheel").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_decode_valid_name() {
    keywheel()
        .args(["decode", "sacsc-data-sasToken"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sacsc"))
        .stdout(predicate::str::contains("data"))
        .stdout(predicate::str::contains("sasToken"));
}

#[test]
fn test_decode_account_scoped_name() {
    keywheel()
        .args(["decode", "sacsc-accountKey"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(account-wide)"));
}

#[test]
fn test_decode_json_output() {
    keywheel()
        .args(["decode", "sacsc-data-sasUri", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"storage_account\": \"sacsc\""))
        .stdout(predicate::str::contains("\"container\": \"data\""))
        .stdout(predicate::str::contains("\"kind\": \"SasUri\""));
}

#[test]
fn test_decode_unknown_kind_fails() {
    keywheel()
        .args(["decode", "sacsc-foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized credential kind 'foo'"));
}

#[test]
fn test_decode_container_on_account_scoped_kind_fails() {
    keywheel()
        .args(["decode", "sacsc-accountKey-accountKey"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("account-scoped"));
}

#[test]
fn test_rotate_without_config_hints_at_setup() {
    let dir = tempfile::TempDir::new().unwrap();
    keywheel()
        .current_dir(dir.path())
        .arg("rotate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_rotate_with_empty_config_requires_resource_groups() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("keywheel.toml"), "[rotation]\n").unwrap();

    keywheel()
        .current_dir(dir.path())
        .arg("rotate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no resource groups configured"));
}

#[test]
fn test_completions_bash() {
    keywheel()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keywheel"));
}

#[test]
fn test_help_lists_commands() {
    keywheel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rotate"))
        .stdout(predicate::str::contains("decode"));
}
