// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! NSQL-specific test helpers and custom assertions

use nsql_lsp_validation::{NsqlDiagnostic, Range, Severity};

/// Custom assertion helpers for diagnostic testing
pub struct DiagnosticAssertions;

impl DiagnosticAssertions {
    /// Assert the severities of a diagnostic list, in order
    pub fn assert_severities(diagnostics: &[NsqlDiagnostic], expected: &[Severity]) {
        let actual: Vec<Severity> = diagnostics.iter().map(|d| d.severity).collect();
        assert_eq!(
            actual, expected,
            "Severity mismatch, diagnostics: {:#?}",
            diagnostics
        );
    }

    /// Assert that some diagnostic has exactly this message
    pub fn assert_has_message(diagnostics: &[NsqlDiagnostic], message: &str) {
        assert!(
            diagnostics.iter().any(|d| d.message == message),
            "No diagnostic with message '{}', found {:?}",
            message,
            diagnostics.iter().map(|d| &d.message).collect::<Vec<_>>()
        );
    }

    /// Assert that a diagnostic covers the given single-line range
    pub fn assert_range(diagnostic: &NsqlDiagnostic, line: u32, start: u32, end: u32) {
        assert_eq!(
            diagnostic.range,
            Range::on_line(line, start, end),
            "Range mismatch for '{}'",
            diagnostic.message
        );
    }

    /// Assert that no diagnostic reports an error
    pub fn assert_no_errors(diagnostics: &[NsqlDiagnostic]) {
        let errors: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect();
        assert!(errors.is_empty(), "Unexpected errors: {:#?}", errors);
    }
}
