//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("holonet").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("holonet").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--memory"))
        .stdout(predicate::str::contains("--cors-permissive"));
}

#[test]
fn test_seed_help() {
    let mut cmd = Command::cargo_bin("holonet").unwrap();
    cmd.arg("seed").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("TOML file"));
}

#[test]
fn test_migrate_requires_database_url() {
    let mut cmd = Command::cargo_bin("holonet").unwrap();
    cmd.env_remove("DATABASE_URL").current_dir(std::env::temp_dir()).arg("migrate");

    cmd.assert().failure();
}

#[test]
fn test_migrate_rejects_non_postgres_url() {
    let mut cmd = Command::cargo_bin("holonet").unwrap();
    cmd.arg("migrate").arg("--database-url").arg("mysql://localhost/holonet");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("postgres://"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("holonet").unwrap();
    cmd.arg("hyperspace");

    cmd.assert().failure();
}
