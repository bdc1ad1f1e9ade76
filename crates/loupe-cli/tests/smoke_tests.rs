//! Smoke tests for the loupe CLI
//!
//! These tests run the real binary against small HTML fixtures.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PAGE: &str = r#"<!doctype html>
<html><body>
  <nav><a href="/">Home</a><a href="/docs">Docs</a></nav>
  <form>
    <label for="email">Email</label>
    <input id="email" type="email" placeholder="you@example.com">
    <button data-testid="submit">Sign in</button>
    <button>Cancel</button>
  </form>
  <p>Item</p><p>Item</p>
</body></html>"#;

/// Get a command for the loupe binary with isolated config and history
fn loupe(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("loupe").expect("loupe binary should exist");
    cmd.env_remove("LOUPE_CONFIG")
        .env_remove("RUST_LOG")
        .env("LOUPE_STORE", dir.path().join("history.json"));
    cmd
}

fn fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("page.html");
    fs::write(&path, PAGE).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    loupe(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    loupe(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("relay"));
}

#[test]
fn test_no_args_shows_help() {
    let dir = TempDir::new().unwrap();
    loupe(&dir).assert().failure();
}

// ============================================================================
// Generate / Validate
// ============================================================================

#[test]
fn test_generate_text() {
    let dir = TempDir::new().unwrap();
    let html = fixture(&dir);
    loupe(&dir)
        .args(["--color", "never", "generate"])
        .arg(&html)
        .args(["--target", "[data-testid=submit]", "--syntax", "js"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            " 1. page.getByRole('button', { name: 'Sign in' }) [unique]",
        ))
        .stdout(predicate::str::contains("page.getByTestId('submit')"));
}

#[test]
fn test_generate_json() {
    let dir = TempDir::new().unwrap();
    let html = fixture(&dir);
    let output = loupe(&dir)
        .arg("generate")
        .arg(&html)
        .args(["--target", "#email", "--syntax", "python", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["syntax"], "python");
    assert_eq!(json["element"], "<input#email>");
    assert_eq!(
        json["strategies"][0]["code"],
        r#"page.get_by_role("textbox", name="Email")"#
    );
}

#[test]
fn test_generate_missing_target() {
    let dir = TempDir::new().unwrap();
    let html = fixture(&dir);
    loupe(&dir)
        .arg("generate")
        .arg(&html)
        .args(["--target", "table"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: No element matches"));
}

#[test]
fn test_validate_unique() {
    let dir = TempDir::new().unwrap();
    let html = fixture(&dir);
    loupe(&dir)
        .args(["--color", "never", "validate"])
        .arg(&html)
        .arg(r#"page.GetByRole(AriaRole.Link, new() { Name = "Docs" })"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Perfect! Unique Match"))
        .stdout(predicate::str::contains("<a>"));
}

#[test]
fn test_validate_multiple_json() {
    let dir = TempDir::new().unwrap();
    let html = fixture(&dir);
    let output = loupe(&dir)
        .arg("validate")
        .arg(&html)
        .args(["page.getByText('Item', { exact: true })", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["isUnique"], false);
    assert_eq!(json["strategy"]["kind"], "text");
}

#[test]
fn test_validate_bad_syntax() {
    let dir = TempDir::new().unwrap();
    let html = fixture(&dir);
    loupe(&dir)
        .arg("validate")
        .arg(&html)
        .arg("await page.$('button')")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid"));
}

// ============================================================================
// Parse / Format
// ============================================================================

#[test]
fn test_parse() {
    let dir = TempDir::new().unwrap();
    loupe(&dir)
        .args(["parse", r#"page.get_by_role("heading", name="Intro", level=2)"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"syntax\": \"python\""))
        .stdout(predicate::str::contains("\"level\": 2"));
}

#[test]
fn test_format() {
    let dir = TempDir::new().unwrap();
    loupe(&dir)
        .args([
            "format",
            r#"{"kind":"placeholder","text":"Search","exact":true}"#,
            "--syntax",
            "csharp",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "page.GetByPlaceholder(\"Search\", new() { Exact = true })\n",
        ));
}

// ============================================================================
// Relay
// ============================================================================

#[test]
fn test_relay() {
    let dir = TempDir::new().unwrap();
    let html = fixture(&dir);
    loupe(&dir)
        .arg("relay")
        .arg(&html)
        .write_stdin(
            "{\"action\":\"getStatus\"}\n{\"action\":\"validateLocator\",\"code\":\"page.getByLabel(\\\"Email\\\")\"}\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"isActive":false,"active":false,"mode":null}"#,
        ))
        .stdout(predicate::str::contains(r#""count":1"#));
}

// ============================================================================
// History
// ============================================================================

#[test]
fn test_record_and_list_history() {
    let dir = TempDir::new().unwrap();
    let html = fixture(&dir);
    loupe(&dir)
        .arg("generate")
        .arg(&html)
        .args(["--target", "nav a", "--syntax", "js", "--record", "-q"])
        .assert()
        .success();

    loupe(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[role] page.getByRole('link', { name: 'Home' }) (A)",
        ));
}

#[test]
fn test_favorites_roundtrip() {
    let dir = TempDir::new().unwrap();
    loupe(&dir)
        .args(["history", "favorite", "page.getByTestId('submit')", "--type", "testId"])
        .assert()
        .success();

    loupe(&dir)
        .args(["history", "favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[testId] page.getByTestId('submit')"));

    loupe(&dir)
        .args(["history", "unfavorite", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no favorite with id 1"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("loupe.yaml");
    fs::write(&config, "syntax: csharp\ntestIdAttribute: data-qa\n").unwrap();
    loupe(&dir)
        .arg("--config")
        .arg(&config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Syntax: C#"))
        .stdout(predicate::str::contains("Test id attribute: data-qa"));
}

#[test]
fn test_config_file_missing() {
    let dir = TempDir::new().unwrap();
    loupe(&dir)
        .args(["--config", "/nonexistent/loupe.yaml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
