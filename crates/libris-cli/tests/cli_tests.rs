//! Integration tests for the libris CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command whose config lookups land in a fresh temporary directory.
fn libris(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("libris").unwrap();
    cmd.env("HOME", config_home.path())
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("LIBRIS_API_BASE_URL");
    cmd
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("libris").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("admin"))
        .stdout(predicate::str::contains("books"))
        .stdout(predicate::str::contains("home"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("libris").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("libris"));
}

#[test]
fn test_books_help() {
    let mut cmd = Command::cargo_bin("libris").unwrap();
    cmd.args(["books", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_add_requires_author() {
    let mut cmd = Command::cargo_bin("libris").unwrap();
    cmd.args(["books", "add", "--title", "Moby Dick"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--author"));
}

#[test]
fn test_config_example() {
    let mut cmd = Command::cargo_bin("libris").unwrap();
    cmd.args(["config", "example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_base_url = \"http://localhost:3001\""))
        .stdout(predicate::str::contains("[logging]"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_path_follows_xdg() {
    let home = TempDir::new().unwrap();
    libris(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("libris"))
        .stdout(predicate::str::contains(home.path().to_string_lossy().as_ref()));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_init_set_get() {
    let home = TempDir::new().unwrap();

    libris(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));

    libris(&home)
        .args(["config", "set", "api_base_url", "http://library.test:8080"])
        .assert()
        .success();

    libris(&home)
        .args(["config", "get", "api_base_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://library.test:8080"));

    libris(&home)
        .args(["config", "set", "database_path", "/tmp/x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_rejects_non_http_api_url() {
    let home = TempDir::new().unwrap();
    libris(&home)
        .args(["--api-url", "ftp://library.test", "books", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http:// or https://"));
}

#[test]
fn test_books_list_unreachable_backend() {
    let home = TempDir::new().unwrap();
    libris(&home)
        .args(["--api-url", "http://127.0.0.1:9", "books", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load books"));
}

#[test]
fn test_home_unreachable_backend() {
    let home = TempDir::new().unwrap();
    libris(&home)
        .args(["--api-url", "http://127.0.0.1:9", "home"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load books"));
}
