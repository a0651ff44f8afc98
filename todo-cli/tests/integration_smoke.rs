//! Smoke tests for command wiring (no database required)

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// todoctl with an empty HOME and working directory, so no .env leaks in.
fn todoctl(sandbox: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("todoctl").unwrap();
    cmd.current_dir(sandbox.path())
        .env("HOME", sandbox.path())
        .env_remove("DATABASE_URL")
        .env_remove("TODOCTL_PASSWORD");
    cmd
}

#[test]
fn test_top_level_help_lists_commands() {
    let sandbox = TempDir::new().unwrap();
    todoctl(&sandbox)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("user"));
}

#[test]
fn test_serve_help() {
    let sandbox = TempDir::new().unwrap();
    todoctl(&sandbox)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--memory"));
}

#[test]
fn test_user_add_help() {
    let sandbox = TempDir::new().unwrap();
    todoctl(&sandbox)
        .args(["user", "add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Email address"));
}

#[test]
fn test_migrate_down_requires_confirmation() {
    let sandbox = TempDir::new().unwrap();
    todoctl(&sandbox)
        .args(["migrate", "down", "--database-url", "postgres://unused/db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_migrate_up_without_database_url_fails() {
    let sandbox = TempDir::new().unwrap();
    todoctl(&sandbox)
        .args(["migrate", "up"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_user_add_rejects_invalid_email_before_connecting() {
    let sandbox = TempDir::new().unwrap();
    todoctl(&sandbox)
        .args([
            "user",
            "add",
            "--username",
            "alice",
            "--email",
            "not-an-email",
            "--password",
            "secret",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("email"));
}
