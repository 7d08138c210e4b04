// piiveil/tests/cli_integration_tests.rs
//! Command-line integration tests for the `piiveil` binary.
//!
//! Each test runs the compiled binary through `assert_cmd`, feeding JSON or
//! text through stdin or temporary files created with `tempfile`.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn piiveil() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("piiveil"));
    cmd.env_remove("PIIVEIL_REGISTRY");
    cmd.env("RUST_LOG", "debug");
    cmd
}

const MASK_REQUEST: &str = r#"{
  "text": "Hello John Doe, your email is john@example.com",
  "entities": [
    {"type": "PERSON", "text": "John Doe", "id": 1, "occurrences": [{"start_idx": 6, "end_idx": 14}]},
    {"type": "EMAIL", "text": "john@example.com", "id": 2, "occurrences": [{"start_idx": 30, "end_idx": 46}]}
  ],
  "modifiers": []
}"#;

#[test]
fn test_mask_from_stdin() {
    piiveil()
        .arg("mask")
        .write_stdin(MASK_REQUEST)
        .assert()
        .success()
        .stdout("Hello [{PERSON_1}], your email is [{EMAIL_2}]\n");
}

#[test]
fn test_mask_with_modifier_and_output_file() -> Result<()> {
    let request = r#"{
      "text": "Hello John Doe, your email is john@example.com",
      "entities": [{"type": "PERSON", "text": "John Doe", "id": 1, "occurrences": [{"start_idx": 6, "end_idx": 14}]}],
      "modifiers": [{"action": "mask", "entity": "your email", "type": "TEST"}]
    }"#;
    let mut input = NamedTempFile::new()?;
    input.write_all(request.as_bytes())?;
    let dir = tempdir()?;
    let out_path = dir.path().join("masked.txt");

    piiveil()
        .args(["mask", "--input"])
        .arg(input.path())
        .arg("--output")
        .arg(&out_path)
        .assert()
        .success();

    let written = fs::read_to_string(&out_path)?;
    assert_eq!(written, "Hello [{PERSON_1}], [{TEST_2}] is john@example.com\n");
    Ok(())
}

#[test]
fn test_mask_honours_label_filter_config() -> Result<()> {
    let mut config = NamedTempFile::new()?;
    config.write_all(b"labels:\n  detect: [ALL]\n  ignore: [EMAIL]\n")?;

    piiveil()
        .args(["mask", "--config"])
        .arg(config.path())
        .write_stdin(MASK_REQUEST)
        .assert()
        .success()
        .stdout(predicate::str::contains("[{PERSON_1}]"))
        .stdout(predicate::str::contains("john@example.com"));
    Ok(())
}

#[test]
fn test_mask_rejects_out_of_range_occurrence() {
    let request = r#"{"text": "short", "entities": [{"type": "PERSON", "text": "x", "id": 1, "occurrences": [{"start_idx": 0, "end_idx": 40}]}]}"#;
    piiveil()
        .arg("mask")
        .write_stdin(request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the text bounds"));
}

#[test]
fn test_consolidate_updates_registry_across_runs() -> Result<()> {
    let dir = tempdir()?;
    let registry_path = dir.path().join("registry.json");
    fs::write(&registry_path, r#"[{"id": 1, "name": "John Doe", "label": "PERSON_1"}]"#)?;

    let detections_path = dir.path().join("doc.json");
    fs::write(
        &detections_path,
        r#"[
          {"type": "PERSON", "text": "JOHN DOE", "occurrences": [{"start_idx": 0, "end_idx": 8}]},
          {"type": "PERSON", "text": "Jane Smith", "occurrences": [{"start_idx": 13, "end_idx": 23}]}
        ]"#,
    )?;

    let output = piiveil()
        .arg("consolidate")
        .arg("--detections")
        .arg(&detections_path)
        .arg("--registry")
        .arg(&registry_path)
        .arg("--write-registry")
        .output()?;
    assert!(output.status.success());

    let consolidated: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(consolidated[0]["id"], 1);
    assert_eq!(consolidated[0]["label"], "PERSON_1");
    assert_eq!(consolidated[1]["id"], 2);

    let registry: Value = serde_json::from_str(&fs::read_to_string(&registry_path)?)?;
    assert_eq!(registry.as_array().map(Vec::len), Some(2));
    assert_eq!(registry[1]["name"], "Jane Smith");
    assert_eq!(registry[1]["label"], "PERSON_2");

    // A second run against the persisted registry changes nothing.
    let rerun = piiveil()
        .arg("consolidate")
        .arg("--detections")
        .arg(&detections_path)
        .arg("--registry")
        .arg(&registry_path)
        .output()?;
    let again: Value = serde_json::from_slice(&rerun.stdout)?;
    assert_eq!(again, consolidated);
    Ok(())
}

#[test]
fn test_consolidate_with_missing_registry_starts_from_one() -> Result<()> {
    let dir = tempdir()?;
    let detections_path = dir.path().join("doc.json");
    fs::write(
        &detections_path,
        r#"[{"type": "EMAIL", "text": "a@b.io", "occurrences": [{"start_idx": 0, "end_idx": 6}]}]"#,
    )?;

    piiveil()
        .arg("consolidate")
        .arg("--detections")
        .arg(&detections_path)
        .arg("--registry")
        .arg(dir.path().join("absent.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"EMAIL_1\""));
    Ok(())
}

#[test]
fn test_unmask_from_stdin() -> Result<()> {
    let mut registry = NamedTempFile::new()?;
    registry.write_all(br#"[{"id": 1, "name": "Alice", "label": "PERSON_1"}, {"id": 10, "name": "Bob", "label": "PERSON_10"}]"#)?;

    piiveil()
        .args(["unmask", "--registry"])
        .arg(registry.path())
        .write_stdin("[{PERSON_10}] met [{PERSON_1}] and [{ORG_3}]\n")
        .assert()
        .success()
        .stdout("Bob met Alice and [{ORG_3}]\n");
    Ok(())
}

#[test]
fn test_format_pages() {
    piiveil()
        .arg("format")
        .write_stdin(r#"[{"content": "first", "page": 0}, {"content": "second", "page": 1}]"#)
        .assert()
        .success()
        .stdout("--- PAGE 1 ---\nfirst\n\n--- PAGE 2 ---\nsecond\n");
}

#[test]
fn test_invalid_json_fails_with_context() {
    piiveil()
        .arg("mask")
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON from stdin"));
}
