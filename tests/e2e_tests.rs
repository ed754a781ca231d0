//! End-to-end tests for the foreachrepo CLI
//!
//! These tests verify:
//! - Usage errors for missing or invalid flags
//! - Credentials are required before any work starts
//! - Task-specific flags are validated before git or the network are touched

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

/// Binary under test with credentials cleared from the environment
fn foreachrepo() -> Command {
    let mut cmd = cargo_bin_cmd!("foreachrepo");
    cmd.env_remove("GITHUB_USERNAME")
        .env_remove("GITHUB_PASSWORD")
        .env_remove("GITHUB_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Add the flags every run needs apart from task and credentials
fn with_common_args(cmd: &mut Command) -> &mut Command {
    cmd.args([
        "--org",
        "acme",
        "--branch",
        "bump-bunyan",
        "--message",
        "TECH Bump bunyan",
    ])
}

#[test]
fn test_help_lists_flags() {
    foreachrepo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--org"))
        .stdout(predicate::str::contains("--task"))
        .stdout(predicate::str::contains("--npm-dep-ver"))
        .stdout(predicate::str::contains("GITHUB_USERNAME"));
}

#[test]
fn test_version_flag() {
    foreachrepo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_arguments_is_usage_error() {
    foreachrepo()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--org"));
}

#[test]
fn test_invalid_task_is_usage_error() {
    with_common_args(&mut foreachrepo())
        .args(["--task", "upgrade"])
        .args(["--github-username", "octocat", "--github-password", "pw"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("upgrade"));
}

#[test]
fn test_missing_credentials_is_usage_error() {
    with_common_args(&mut foreachrepo())
        .args(["--task", "freeze"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--github-username"));
}

#[test]
fn test_empty_credentials_are_usage_error() {
    with_common_args(&mut foreachrepo())
        .args(["--task", "freeze"])
        .env("GITHUB_USERNAME", "")
        .env("GITHUB_PASSWORD", "")
        .env("PATH", "/nonexistent")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--github-username"))
        .stderr(predicate::str::contains("git command not found").not());
}

#[test]
fn test_empty_password_is_usage_error() {
    with_common_args(&mut foreachrepo())
        .args(["--task", "freeze"])
        .env("GITHUB_USERNAME", "octocat")
        .env("GITHUB_PASSWORD", "")
        .env("PATH", "/nonexistent")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--github-password"));
}

#[test]
fn test_bump_without_dependency_fails() {
    with_common_args(&mut foreachrepo())
        .args(["--task", "bump", "--npm-dep-ver", "1.8.2"])
        .env("GITHUB_USERNAME", "octocat")
        .env("GITHUB_PASSWORD", "pw")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "--npm-dep is required when task is bump",
        ));
}

#[test]
fn test_bump_without_version_fails() {
    with_common_args(&mut foreachrepo())
        .args(["--task", "Bump", "--npm-dep", "bunyan"])
        .env("GITHUB_USERNAME", "octocat")
        .env("GITHUB_PASSWORD", "pw")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "--npm-dep-ver is required when task is bump",
        ));
}
