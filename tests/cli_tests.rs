//! CLI and command tests

mod common;

use common::{setup_design, setup_design_with, susp};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    susp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("double wishbone"));
}

#[test]
fn test_version_displays() {
    susp()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("susp"));
}

#[test]
fn test_unknown_command_fails() {
    susp()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_bash() {
    susp()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("susp"));
}

// ============================================================================
// Template Command Tests
// ============================================================================

#[test]
fn test_template_prints_design() {
    susp()
        .arg("template")
        .assert()
        .success()
        .stdout(predicate::str::contains("Double Wishbone"))
        .stdout(predicate::str::contains("LAF:"))
        .stdout(predicate::str::contains(".nan"));
}

#[test]
fn test_template_writes_file() {
    let (_tmp, path) = setup_design();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# Suspension design file"));
    assert!(content.contains("wheelbase: 1525"));
}

// ============================================================================
// Design Command Tests
// ============================================================================

#[test]
fn test_design_prints_hardpoints_and_kinematics() {
    let (_tmp, path) = setup_design();
    susp()
        .arg("design")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hardpoints"))
        .stdout(predicate::str::contains("(127.00, 220.98, 12.70)"))
        .stdout(predicate::str::contains("Roll center"))
        .stdout(predicate::str::contains("(762.50, 610.00, 0.00)"));
}

#[test]
fn test_design_json_output() {
    let (_tmp, path) = setup_design();
    let output = susp()
        .args(["design", "--format", "json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let designs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let design = &designs[0];
    assert_eq!(design["subsystem"], "linkage");
    assert_eq!(design["hardpoints"].as_array().unwrap().len(), 8);

    let contact = design["kinematics"]["contact_patch"][0].as_f64().unwrap();
    assert!((contact - 762.5).abs() < 1e-9);
    assert!(design["kinematics"]["side_instant_center"].is_null());
}

#[test]
fn test_design_yaml_output_lists_inheritance() {
    let (_tmp, path) = setup_design();
    susp()
        .args(["design", "-f", "yaml"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("inherited:"))
        .stdout(predicate::str::contains("dependent: UAR"));
}

#[test]
fn test_design_sample_override() {
    let (_tmp, path) = setup_design();
    let mut content = fs::read_to_string(&path).unwrap();
    content.push_str("sample:\n  linkage:\n    LAF: [0.0, 0.0, 1.0]\n");
    fs::write(&path, content).unwrap();

    susp()
        .arg("design")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("(127.00, 203.20, 38.10)"));
}

#[test]
fn test_design_invalid_axle() {
    let (_tmp, path) = setup_design_with("axle: Front", "axle: Middle");
    susp()
        .arg("design")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_design_unsupported_linkage() {
    let (_tmp, path) = setup_design_with("linkage: Double Wishbone", "linkage: MacPherson");
    susp()
        .arg("design")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported linkage type"));
}

#[test]
fn test_design_strut_is_unsupported() {
    let (_tmp, path) = setup_design();
    susp()
        .args(["design", "-s", "linkage", "-s", "strut"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported strut type"));
}

#[test]
fn test_design_unknown_subsystem_lists_choices() {
    let (_tmp, path) = setup_design();
    susp()
        .args(["design", "-s", "wheel"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("linkage, strut, spring"));
}

#[test]
fn test_design_missing_file() {
    let tmp = TempDir::new().unwrap();
    susp()
        .arg("design")
        .arg(tmp.path().join("nope.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read design file"));
}

#[test]
fn test_design_malformed_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.yaml");
    fs::write(&path, "name: broken\ntarget: [1, 2\n").unwrap();
    susp().arg("design").arg(&path).assert().failure();
}

// ============================================================================
// Frames Command Tests
// ============================================================================

#[test]
fn test_frames_table() {
    let (_tmp, path) = setup_design();
    susp()
        .arg("frames")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("8 frames"))
        .stdout(predicate::str::contains("I → B → X → TR"))
        .stdout(predicate::str::contains("Lower A-Arm"));
}

#[test]
fn test_frames_yaml() {
    let (_tmp, path) = setup_design();
    susp()
        .args(["frames", "--format", "yaml"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("key: TR"))
        .stdout(predicate::str::contains("parent: X"));
}
