//! Integration tests for `gstin validate`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the compiled `gstin` binary.
fn gstin_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gstin"))
}

fn validate(args: &[&str]) -> Output {
    Command::new(gstin_bin())
        .arg("validate")
        .args(args)
        .output()
        .expect("run gstin validate")
}

#[test]
fn validate_good_gstin_exit_0() {
    let out = validate(&["27ABCDE1234F1Z5"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout, "27ABCDE1234F1Z5  valid  state 27  PAN ABCDE1234F\n");
}

#[test]
fn validate_lowercase_is_normalized() {
    let out = validate(&["27abcde1234f1z5"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("27ABCDE1234F1Z5 "), "stdout: {stdout}");
}

#[test]
fn validate_bad_gstin_exit_2() {
    let out = validate(&["27ABCDE1234F1Z"]);
    assert_eq!(out.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("invalid: enter a valid 15-character GSTIN"),
        "stdout: {stdout}"
    );
}

#[test]
fn validate_mixed_reports_every_input() {
    let out = validate(&["27ABCDE1234F1Z5", "27ABCDE1234F0Z5", "29AAPFU0939F1ZV"]);
    assert_eq!(out.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 3, "stdout: {stdout}");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("1 of 3"), "stderr: {stderr}");
}

#[test]
fn validate_json_is_ndjson() {
    let out = validate(&["--format", "json", "27ABCDE1234F1Z5", "nope"]);
    assert_eq!(out.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("NDJSON line"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["valid"], true);
    assert_eq!(lines[0]["pan"], "ABCDE1234F");
    assert_eq!(lines[0]["state_code"], "27");
    assert_eq!(lines[1]["valid"], false);
    assert_eq!(lines[1]["input"], "nope");
}

/// `NO_COLOR` is a presence convention, not a boolean: common values such as
/// `1` and the empty string must not be rejected at argument parsing.
#[test]
fn validate_accepts_any_no_color_value() {
    for value in ["1", "true", ""] {
        let out = Command::new(gstin_bin())
            .arg("validate")
            .arg("27ABCDE1234F1Z5")
            .env("NO_COLOR", value)
            .output()
            .expect("run gstin validate");
        assert!(
            out.status.success(),
            "NO_COLOR={value:?} exit code: {:?}, stderr: {}",
            out.status.code(),
            String::from_utf8_lossy(&out.stderr)
        );
        assert!(!out.stdout.contains(&0x1b), "NO_COLOR={value:?}");
    }
}
