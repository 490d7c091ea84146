//! CLI interface tests

mod common;

use common::lisan;
use tempfile::TempDir;

#[test]
fn test_help_command() {
    let home = TempDir::new().unwrap();
    let output = lisan(&home)
        .arg("--help")
        .output()
        .expect("Failed to run help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("chat"), "Should list chat command");
    assert!(stdout.contains("translate"), "Should list translate command");
    assert!(stdout.contains("pending"), "Should list pending command");
    assert!(stdout.contains("add"), "Should list add command");
    assert!(stdout.contains("lookup"), "Should list lookup command");
    assert!(stdout.contains("render"), "Should list render command");
    assert!(stdout.contains("config"), "Should list config command");
}

#[test]
fn test_version_command() {
    let home = TempDir::new().unwrap();
    let output = lisan(&home)
        .arg("--version")
        .output()
        .expect("Failed to run version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lisan"), "Should show program name");
}

#[test]
fn test_translate_help() {
    let home = TempDir::new().unwrap();
    let output = lisan(&home)
        .args(["translate", "--help"])
        .output()
        .expect("Failed to run translate help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--dict"), "Should have dict option");
    assert!(stdout.contains("--fallback"), "Should have fallback option");
    assert!(stdout.contains("--html"), "Should have html option");
    assert!(stdout.contains("--json"), "Should have json option");
}

#[test]
fn test_rejects_unknown_fallback() {
    let home = TempDir::new().unwrap();
    let output = lisan(&home)
        .args(["translate", "ma", "--fallback", "shout"])
        .output()
        .expect("Failed to run translate");

    assert!(!output.status.success());
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();

    let output = lisan(&home)
        .args(["config", "set", "transliteration.fallback", "bracket"])
        .output()
        .expect("Failed to run config set");
    assert!(
        output.status.success(),
        "config set should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = lisan(&home)
        .args(["config", "get", "transliteration.fallback"])
        .output()
        .expect("Failed to run config get");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("transliteration.fallback = bracket"));

    let output = lisan(&home)
        .args(["config", "set", "api.key", "x"])
        .output()
        .expect("Failed to run config set");
    assert!(!output.status.success(), "Unknown keys should be rejected");
}
