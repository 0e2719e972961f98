//! Shared test helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get a susp command
pub fn susp() -> Command {
    Command::new(cargo::cargo_bin!("susp"))
}

/// Write the example design file into a fresh temp directory
pub fn setup_design() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("design.yaml");
    susp()
        .args(["template", "--output"])
        .arg(&path)
        .assert()
        .success();
    (tmp, path)
}

/// Write the example design with one text substitution applied
pub fn setup_design_with(from: &str, to: &str) -> (TempDir, PathBuf) {
    let (tmp, path) = setup_design();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(from), "template has no '{}'", from);
    fs::write(&path, content.replacen(from, to, 1)).unwrap();
    (tmp, path)
}
