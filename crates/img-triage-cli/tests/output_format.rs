//! Output format tests.
//!
//! Verifies the CSV, JSON and JSON Lines renderings of a report.

#![allow(clippy::unwrap_used, clippy::float_cmp)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use img_triage_test_support::SyntheticImageBuilder;
use predicates::prelude::*;
use serde_json::Value;

const HEADER: &str = "image,blur,low_brightness,high_brightness,grayscale,brightness,contrast,blur_score";

fn img_triage(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("img-triage").unwrap();
    cmd.current_dir(home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("IMG_TRIAGE_BLUR_TH")
        .env_remove("IMG_TRIAGE_LOW_BRIGHTNESS")
        .env_remove("IMG_TRIAGE_HIGH_BRIGHTNESS")
        .env_remove("IMG_TRIAGE_GRAYSCALE_TOL")
        .env_remove("IMG_TRIAGE_EXPORT")
        .env_remove("IMG_TRIAGE_LOG");
    cmd
}

/// Writes a sharp colour image and a flat mid-gray image, in that order.
fn two_images(dir: &Path) -> Vec<PathBuf> {
    let color = dir.join("a_color.png");
    let gray = dir.join("b_gray.png");
    SyntheticImageBuilder::color_checkerboard(64, 64)
        .image
        .save(&color)
        .unwrap();
    SyntheticImageBuilder::uniform_gray(4, 4, 128)
        .image
        .save(&gray)
        .unwrap();
    vec![color, gray]
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    String::from_utf8(output.stdout).unwrap()
}

// === CSV ===

#[test]
fn test_csv_is_default_format() {
    let home = tempfile::tempdir().unwrap();
    let paths = two_images(home.path());

    let stdout = stdout_of(img_triage(home.path()).args(&paths));
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], HEADER);
}

#[test]
fn test_csv_rows_follow_input_order() {
    let home = tempfile::tempdir().unwrap();
    let mut paths = two_images(home.path());
    paths.reverse();

    let stdout = stdout_of(img_triage(home.path()).arg("--format=csv").args(&paths));
    let mut reader = csv::Reader::from_reader(stdout.as_bytes());
    let images: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[0].to_string())
        .collect();

    assert!(images[0].ends_with("b_gray.png"));
    assert!(images[1].ends_with("a_color.png"));
}

#[test]
fn test_csv_mid_gray_row_values() {
    let home = tempfile::tempdir().unwrap();
    let paths = two_images(home.path());

    let stdout = stdout_of(img_triage(home.path()).arg(&paths[1]));
    let mut reader = csv::Reader::from_reader(stdout.as_bytes());
    let record = reader.records().next().unwrap().unwrap();

    assert_eq!(&record[1], "true"); // blur
    assert_eq!(&record[2], "false"); // low_brightness
    assert_eq!(&record[3], "false"); // high_brightness
    assert_eq!(&record[4], "true"); // grayscale
    assert_eq!(record[5].parse::<f64>().unwrap(), 128.0);
    assert_eq!(record[6].parse::<f64>().unwrap(), 0.0);
    assert_eq!(record[7].parse::<f64>().unwrap(), 0.0);
}

#[test]
fn test_csv_header_only_when_nothing_analyzed() {
    let home = tempfile::tempdir().unwrap();
    let empty = home.path().join("empty");
    std::fs::create_dir(&empty).unwrap();

    img_triage(home.path())
        .arg(&empty)
        .assert()
        .code(0)
        .stdout(format!("{HEADER}\n"));
}

// === JSON ===

#[test]
fn test_json_format_is_array() {
    let home = tempfile::tempdir().unwrap();
    let paths = two_images(home.path());

    let stdout = stdout_of(img_triage(home.path()).arg("--format=json").args(&paths));
    let parsed: Value = serde_json::from_str(stdout.trim()).unwrap();
    let rows = parsed.as_array().unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows[0]["image"].as_str().unwrap().ends_with("a_color.png"));
}

#[test]
fn test_json_rows_are_flat() {
    let home = tempfile::tempdir().unwrap();
    let paths = two_images(home.path());

    let stdout = stdout_of(img_triage(home.path()).arg("--format=json").arg(&paths[1]));
    let parsed: Value = serde_json::from_str(stdout.trim()).unwrap();
    let row = parsed[0].as_object().unwrap();

    let keys: Vec<&str> = row.keys().map(String::as_str).collect();
    for key in HEADER.split(',') {
        assert!(keys.contains(&key), "missing {key} in {keys:?}");
    }
    assert_eq!(row["blur"], Value::Bool(true));
    assert_eq!(row["brightness"].as_f64(), Some(128.0));
}

#[test]
fn test_json_format_empty_array_for_no_images() {
    let home = tempfile::tempdir().unwrap();
    let empty = home.path().join("empty");
    std::fs::create_dir(&empty).unwrap();

    img_triage(home.path())
        .arg("--format=json")
        .arg(&empty)
        .assert()
        .code(0)
        .stdout("[]\n");
}

#[test]
fn test_pretty_format_is_indented() {
    let home = tempfile::tempdir().unwrap();
    let paths = two_images(home.path());

    let stdout = stdout_of(
        img_triage(home.path())
            .args(["--format", "json", "--pretty"])
            .arg(&paths[0]),
    );

    assert!(stdout.lines().count() > 3);
    assert!(stdout.contains("  \"image\""));
    serde_json::from_str::<Value>(&stdout).unwrap();
}

#[test]
fn test_non_pretty_format_is_compact() {
    let home = tempfile::tempdir().unwrap();
    let paths = two_images(home.path());

    let stdout = stdout_of(img_triage(home.path()).arg("--format=json").args(&paths));
    assert_eq!(stdout.lines().count(), 1);
}

// === JSON Lines ===

#[test]
fn test_jsonl_one_object_per_line() {
    let home = tempfile::tempdir().unwrap();
    let paths = two_images(home.path());

    let stdout = stdout_of(img_triage(home.path()).arg("--format=jsonl").args(&paths));
    let rows: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(Value::is_object));
    assert_eq!(rows[0]["grayscale"], Value::Bool(false));
    assert_eq!(rows[1]["grayscale"], Value::Bool(true));
}

#[test]
fn test_summary_goes_to_stderr_only() {
    let home = tempfile::tempdir().unwrap();
    let paths = two_images(home.path());

    img_triage(home.path())
        .arg("--format=jsonl")
        .args(&paths)
        .assert()
        .stdout(predicate::str::contains("Total:").not())
        .stderr(predicate::str::contains(
            "Total: 2 | Blurred: 1 | Dark: 0 | Bright: 0 | Grayscale: 1",
        ));
}
