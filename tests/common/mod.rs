#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

pub const SAMPLE_TABLE: &str = "khabar,خبر\nkarwa,کروا\nma,ما\nche,چھے\n";

/// Runs the binary with its config directory isolated inside `home`.
pub fn lisan(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lisan"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

pub fn write_table(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("transliteration_dataset.csv");
    fs::write(&path, content).unwrap();
    path
}
