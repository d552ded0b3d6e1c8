// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # External Parser Delegation
//!
//! Runs a native NSQL parser as a child process and translates its JSON
//! error report into diagnostics.
//!
//! ## Contract
//!
//! The parser is invoked as `<parser> <file>` where `<file>` holds the
//! document text verbatim. On success it prints a JSON array to stdout:
//!
//! ```json
//! [{"line": 2, "column": 5, "length": 3, "severity": "error", "message": "bad token"}]
//! ```
//!
//! Lines and columns are 1-based. A missing `length` means 1.
//!
//! ## Failure handling
//!
//! - Process failure (spawn, exit status, timeout, I/O): one error diagnostic
//!   at the top of the document.
//! - Output that is not an error array: one warning diagnostic at the top of
//!   the document, with the raw output logged.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use tempfile::TempPath;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::diagnostic::{DiagnosticCode, NsqlDiagnostic, PARSER_SOURCE, Range};
use crate::error::{MalformedOutput, ParserError, ParserResult};
use crate::provider::DiagnosticProvider;
use crate::text::SourceLines;

/// Width of the range used for synthetic parser diagnostics
const SYNTHETIC_RANGE_END: u32 = 10;

/// One error reported by the external parser
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserErrorRecord {
    /// 1-based line
    pub line: i64,
    /// 1-based column
    pub column: i64,
    /// Span length; absent or < 1 means 1
    #[serde(default)]
    pub length: Option<i64>,
    /// `"warning"` maps to a warning, anything else to an error
    #[serde(default)]
    pub severity: String,
    pub message: String,
}

impl ParserErrorRecord {
    /// Effective span length
    pub fn span_len(&self) -> i64 {
        self.length.unwrap_or(1).max(1)
    }

    /// Translate into a diagnostic, clamping the range to the document
    pub fn to_diagnostic(&self, lines: &SourceLines<'_>) -> NsqlDiagnostic {
        let line = usize::try_from(self.line.saturating_sub(1).max(0))
            .unwrap_or(usize::MAX)
            .min(lines.last_index());
        let width = i64::from(lines.width(line));

        let start = self.column.saturating_sub(1).clamp(0, width);
        let end = start.saturating_add(self.span_len()).clamp(start, width);

        let range = Range::on_line(line as u32, start as u32, end as u32);
        let diagnostic = if self.severity == "warning" {
            NsqlDiagnostic::warning(&self.message, range)
        } else {
            NsqlDiagnostic::error(&self.message, range)
        };

        diagnostic
            .with_code(DiagnosticCode::ParserReported)
            .with_source(PARSER_SOURCE)
    }
}

/// Parse the parser's stdout
pub fn parse_output(stdout: &str) -> Result<Vec<ParserErrorRecord>, MalformedOutput> {
    serde_json::from_str(stdout).map_err(|source| MalformedOutput {
        raw: stdout.to_string(),
        source,
    })
}

/// Translate parser records for the given document text
pub fn translate(records: &[ParserErrorRecord], text: &str) -> Vec<NsqlDiagnostic> {
    let lines = SourceLines::new(text);
    records.iter().map(|r| r.to_diagnostic(&lines)).collect()
}

/// Diagnostic reported when the parser could not be run
pub fn failure_diagnostic(err: &ParserError) -> NsqlDiagnostic {
    NsqlDiagnostic::error(
        format!("NSQL parser failed: {err}"),
        Range::on_line(0, 0, SYNTHETIC_RANGE_END),
    )
    .with_code(DiagnosticCode::ParserFailure)
}

/// Diagnostic reported when the parser output could not be read
pub fn malformed_output_diagnostic(err: &MalformedOutput) -> NsqlDiagnostic {
    NsqlDiagnostic::warning(
        format!("NSQL parser returned unreadable output: {err}"),
        Range::on_line(0, 0, SYNTHETIC_RANGE_END),
    )
    .with_code(DiagnosticCode::ParserOutput)
}

/// Diagnostic provider backed by an external parser executable
#[derive(Debug, Clone)]
pub struct ExternalParser {
    path: PathBuf,
    timeout: Duration,
}

impl ExternalParser {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run the parser over `text` and return its stdout
    ///
    /// The temporary input file is removed when this returns, whatever the
    /// outcome.
    pub async fn run(&self, text: &str) -> ParserResult<String> {
        let input = write_temp_input(text)?;
        debug!("Running NSQL parser {:?} on {:?}", self.path, &*input);

        let child = Command::new(&self.path)
            .arg(&*input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ParserError::Spawn)?;

        // Dropping the pending future on timeout drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ParserError::Timeout(self.timeout.as_millis()))?
            .map_err(ParserError::Io)?;

        if !output.status.success() {
            return Err(ParserError::ExitStatus {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run the parser and turn every outcome into diagnostics
    pub async fn check(&self, text: &str) -> Vec<NsqlDiagnostic> {
        let stdout = match self.run(text).await {
            Ok(stdout) => stdout,
            Err(err) => {
                warn!("NSQL parser {:?} failed: {}", self.path, err);
                return vec![failure_diagnostic(&err)];
            }
        };

        match parse_output(&stdout) {
            Ok(records) => translate(&records, text),
            Err(err) => {
                warn!(
                    "NSQL parser {:?} returned unreadable output ({}): {}",
                    self.path, err, err.raw
                );
                vec![malformed_output_diagnostic(&err)]
            }
        }
    }
}

#[async_trait::async_trait]
impl DiagnosticProvider for ExternalParser {
    fn name(&self) -> &'static str {
        "external parser"
    }

    async fn diagnose(&self, text: &str) -> Vec<NsqlDiagnostic> {
        self.check(text).await
    }
}

fn write_temp_input(text: &str) -> ParserResult<TempPath> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();

    let mut file = tempfile::Builder::new()
        .prefix(&format!("nsql_temp_{millis}_"))
        .suffix(".nsql")
        .tempfile()
        .map_err(ParserError::TempFile)?;

    file.write_all(text.as_bytes())
        .and_then(|()| file.flush())
        .map_err(ParserError::TempFile)?;

    Ok(file.into_temp_path())
}
