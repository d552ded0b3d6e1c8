// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Diagnostic Model
//!
//! Transport-independent diagnostic types produced by the validation engine.
//! The server crate converts these into protocol diagnostics.
//!
//! Lines are 0-based; columns are 0-based UTF-16 code units, which is what
//! editors expect on the wire.

use serde::{Deserialize, Serialize};

/// Source tag for diagnostics produced by the server itself
pub const SERVER_SOURCE: &str = "nsql-server";

/// Source tag for diagnostics translated from the external parser
pub const PARSER_SOURCE: &str = "nsql-parser";

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// Position in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Range in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Range covering columns `start..end` of a single line
    pub fn on_line(line: u32, start: u32, end: u32) -> Self {
        Self::new(Position::new(line, start), Position::new(line, end))
    }
}

/// Diagnostic code identifying the check that produced a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Statement not ended by `;` or `PLEASE`
    MissingTerminator,

    /// Odd number of double quotes on a line
    UnclosedString,

    /// FIND ... FROM without a filter keyword
    MissingFilter,

    /// Reported by the external parser
    ParserReported,

    /// The external parser could not be run
    ParserFailure,

    /// The external parser printed something other than an error array
    ParserOutput,
}

impl DiagnosticCode {
    /// Get the string representation of this diagnostic code
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::MissingTerminator => "NSQL-001",
            DiagnosticCode::UnclosedString => "NSQL-002",
            DiagnosticCode::MissingFilter => "NSQL-003",
            DiagnosticCode::ParserReported => "PARSER-001",
            DiagnosticCode::ParserFailure => "PARSER-900",
            DiagnosticCode::ParserOutput => "PARSER-901",
        }
    }
}

/// NSQL diagnostic
///
/// The internal representation of a finding, before conversion to the
/// protocol format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsqlDiagnostic {
    /// Diagnostic message
    pub message: String,

    /// Severity level
    pub severity: Severity,

    /// Range in the source text
    pub range: Range,

    /// Diagnostic code
    pub code: Option<DiagnosticCode>,

    /// Source tag (`nsql-server` or `nsql-parser`)
    pub source: &'static str,
}

impl NsqlDiagnostic {
    /// Create a new diagnostic with the server source tag
    pub fn new(message: impl Into<String>, severity: Severity, range: Range) -> Self {
        Self {
            message: message.into(),
            severity,
            range,
            code: None,
            source: SERVER_SOURCE,
        }
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the source tag
    pub fn with_source(mut self, source: &'static str) -> Self {
        self.source = source;
        self
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>, range: Range) -> Self {
        Self::new(message, Severity::Error, range)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>, range: Range) -> Self {
        Self::new(message, Severity::Warning, range)
    }

    /// Create an information diagnostic
    pub fn information(message: impl Into<String>, range: Range) -> Self {
        Self::new(message, Severity::Information, range)
    }

    /// Create a hint diagnostic
    pub fn hint(message: impl Into<String>, range: Range) -> Self {
        Self::new(message, Severity::Hint, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_server_source() {
        let diagnostic = NsqlDiagnostic::warning("Warning", Range::on_line(0, 0, 5));

        assert_eq!(diagnostic.message, "Warning");
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.source, SERVER_SOURCE);
        assert!(diagnostic.code.is_none());
    }

    #[test]
    fn test_with_code_and_source() {
        let diagnostic = NsqlDiagnostic::error("bad token", Range::on_line(1, 4, 7))
            .with_code(DiagnosticCode::ParserReported)
            .with_source(PARSER_SOURCE);

        assert_eq!(diagnostic.code, Some(DiagnosticCode::ParserReported));
        assert_eq!(diagnostic.source, "nsql-parser");
        assert_eq!(diagnostic.range.start, Position::new(1, 4));
        assert_eq!(diagnostic.range.end, Position::new(1, 7));
    }

    #[test]
    fn test_diagnostic_code_as_str() {
        assert_eq!(DiagnosticCode::MissingTerminator.as_str(), "NSQL-001");
        assert_eq!(DiagnosticCode::UnclosedString.as_str(), "NSQL-002");
        assert_eq!(DiagnosticCode::MissingFilter.as_str(), "NSQL-003");
        assert_eq!(DiagnosticCode::ParserFailure.as_str(), "PARSER-900");
    }
}
