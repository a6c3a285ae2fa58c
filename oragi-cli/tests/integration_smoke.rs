//! Smoke tests for CLI wiring. None of these reach a database.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `oragi` isolated from the caller's environment: no DATABASE_URL, no
/// ~/.oragi config and no .env in the working directory.
fn oragi(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("oragi").unwrap();
    cmd.env_remove("DATABASE_URL")
        .env_remove("ORAGI_SCHEMA")
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .current_dir(home.path());
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    oragi(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("provision"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("drop"));
}

#[test]
fn test_inspect_help() {
    let home = TempDir::new().unwrap();
    oragi(&home)
        .args(["inspect", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Output as JSON"));
}

#[test]
fn test_provision_without_database_fails() {
    let home = TempDir::new().unwrap();
    oragi(&home)
        .arg("provision")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "either a connection pool or connection parameters must be provided",
        ));
}

#[test]
fn test_inspect_without_database_fails() {
    let home = TempDir::new().unwrap();
    oragi(&home)
        .arg("inspect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No database URL configured"));
}

#[test]
fn test_invalid_schema_rejected() {
    let home = TempDir::new().unwrap();
    oragi(&home)
        .args(["provision", "--schema", "x; DROP TABLE y"])
        .env("DATABASE_URL", "postgres://oragi@127.0.0.1:1/oragi")
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema name"));
}

#[test]
fn test_drop_requires_confirmation() {
    let home = TempDir::new().unwrap();
    oragi(&home)
        .arg("drop")
        .assert()
        .failure()
        .stderr(predicate::str::contains("without --yes"));
}

#[test]
fn test_missing_config_file() {
    let home = TempDir::new().unwrap();
    oragi(&home)
        .args(["provision", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
