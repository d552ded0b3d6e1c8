// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! External parser integration tests
//!
//! Each test writes a small shell script that plays the parser.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use nsql_lsp_validation::{
    DiagnosticCode, HeuristicScanner, Range, Severity, ValidationConfig, ValidationEngine,
};
use tempfile::TempDir;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).unwrap();
    path
}

fn engine_for(path: &Path) -> ValidationEngine {
    ValidationEngine::from_config(ValidationConfig::with_parser(path))
}

#[tokio::test]
async fn test_parser_errors_are_translated() {
    let dir = TempDir::new().unwrap();
    let parser = write_script(
        dir.path(),
        "parser.sh",
        r#"echo '[{"line":2,"column":5,"length":3,"severity":"error","message":"bad token"}]'"#,
    );

    let engine = engine_for(&parser);
    assert_eq!(engine.validator_name(), "external parser");

    let diagnostics = engine.validate("ASK a;\nTELL ADD thing;").await;

    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!(d.severity, Severity::Error);
    assert_eq!(d.message, "bad token");
    assert_eq!(d.source, "nsql-parser");
    assert_eq!(d.range, Range::on_line(1, 4, 7));
}

#[tokio::test]
async fn test_parser_warnings_and_empty_report() {
    let dir = TempDir::new().unwrap();
    let parser = write_script(
        dir.path(),
        "parser.sh",
        r#"echo '[{"line":1,"column":1,"severity":"warning","message":"style"}]'"#,
    );
    let diagnostics = engine_for(&parser).validate("GET x;").await;
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].range, Range::on_line(0, 0, 1));

    let clean = write_script(dir.path(), "clean.sh", "echo '[]'");
    // The parser replaces the scanner entirely, so no scanner findings either.
    let diagnostics = engine_for(&clean).validate("FIND users FROM accounts").await;
    assert!(diagnostics.is_empty());
}

#[tokio::test]
async fn test_missing_parser_falls_back_to_scanner() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nsql-parser");

    let text = "FIND users FROM accounts";
    let diagnostics = engine_for(&missing).validate(text).await;

    assert_eq!(diagnostics, HeuristicScanner::new().scan(text));
    assert!(
        diagnostics
            .iter()
            .all(|d| !d.message.starts_with("NSQL parser failed"))
    );
}

#[tokio::test]
async fn test_nonzero_exit_reports_failure() {
    let dir = TempDir::new().unwrap();
    let parser = write_script(dir.path(), "parser.sh", "echo boom >&2\nexit 3");

    let diagnostics = engine_for(&parser).validate("ASK a;").await;

    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!(d.severity, Severity::Error);
    assert_eq!(d.source, "nsql-server");
    assert_eq!(d.code, Some(DiagnosticCode::ParserFailure));
    assert_eq!(d.range, Range::on_line(0, 0, 10));
    assert!(d.message.starts_with("NSQL parser failed: "), "{}", d.message);
    assert!(d.message.contains("boom"), "{}", d.message);
}

#[tokio::test]
async fn test_unexecutable_parser_reports_failure() {
    let dir = TempDir::new().unwrap();
    let parser = dir.path().join("parser.sh");
    fs::write(&parser, "#!/bin/sh\necho '[]'\n").unwrap();
    let mut permissions = fs::metadata(&parser).unwrap().permissions();
    permissions.set_mode(0o644);
    fs::set_permissions(&parser, permissions).unwrap();

    let diagnostics = engine_for(&parser).validate("ASK a;").await;

    assert_eq!(diagnostics.len(), 1);
    assert!(
        diagnostics[0]
            .message
            .starts_with("NSQL parser failed: failed to start parser")
    );
}

#[tokio::test]
async fn test_malformed_output_is_visible() {
    let dir = TempDir::new().unwrap();
    let parser = write_script(dir.path(), "parser.sh", "echo 'not json at all'");

    let diagnostics = engine_for(&parser).validate("ASK a;").await;

    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!(d.severity, Severity::Warning);
    assert_eq!(d.code, Some(DiagnosticCode::ParserOutput));
    assert_eq!(d.range, Range::on_line(0, 0, 10));
    assert!(
        d.message.starts_with("NSQL parser returned unreadable output: "),
        "{}",
        d.message
    );
}

#[tokio::test]
async fn test_slow_parser_times_out() {
    let dir = TempDir::new().unwrap();
    let parser = write_script(dir.path(), "parser.sh", "sleep 5\necho '[]'");

    let config = ValidationConfig::with_parser(&parser).timeout(Duration::from_millis(200));
    let engine = ValidationEngine::from_config(config);

    let started = std::time::Instant::now();
    let diagnostics = engine.validate("ASK a;").await;

    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert!(
        diagnostics[0].message.contains("timed out after 200 ms"),
        "{}",
        diagnostics[0].message
    );
}

#[tokio::test]
async fn test_temp_file_holds_text_and_is_removed() {
    let dir = TempDir::new().unwrap();
    let seen = dir.path().join("seen");
    let copy = dir.path().join("copy");
    let parser = write_script(
        dir.path(),
        "parser.sh",
        &format!(
            "echo \"$1\" > '{}'\ncat \"$1\" > '{}'\necho '[]'",
            seen.display(),
            copy.display()
        ),
    );

    let text = "ASK something;\nTELL ADD \"x\";";
    let diagnostics = engine_for(&parser).validate(text).await;
    assert!(diagnostics.is_empty());

    let input = PathBuf::from(fs::read_to_string(&seen).unwrap().trim());
    let name = input.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("nsql_temp_"), "{name}");
    assert!(name.ends_with(".nsql"), "{name}");

    assert_eq!(fs::read_to_string(&copy).unwrap(), text);
    assert!(!input.exists(), "temp file {input:?} was not removed");
}
