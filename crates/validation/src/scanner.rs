// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Heuristic Scanner
//!
//! Built-in, line-oriented validation of NSQL text. No tokenizer and no
//! grammar: every check is a pattern match over lines or over the whole text.
//!
//! ## Checks
//!
//! 1. Statement termination: lines are folded into statements by a small
//!    state machine ([`StatementState`]). A statement that contains a
//!    query-start keyword and is not ended by `;` or `PLEASE` gets a warning.
//! 2. Unclosed strings: a line with an odd number of `"` gets an error.
//! 3. Missing filter: a `FIND ... FROM ...` span without `WHERE`, `THAT`,
//!    `WHICH`, `IF` or `WHEN` gets an information hint.
//!
//! Checks 1 and 2 run in the same pass and interleave per line; check 3 is
//! appended afterwards.
//!
//! ## Blank lines
//!
//! A blank line neither starts nor ends a statement, so a statement may span
//! blank lines until it is terminated.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::diagnostic::{DiagnosticCode, NsqlDiagnostic, Range};
use crate::provider::DiagnosticProvider;
use crate::text::{SourceLines, line_of_offset};

/// Comment marker; a line starting with it (after trim) is ignored
pub const COMMENT_MARKER: &str = ">>";

pub const MISSING_TERMINATOR_MESSAGE: &str = "Statement should end with semicolon (;) or 'PLEASE'";
pub const UNCLOSED_STRING_MESSAGE: &str = "Unclosed string literal";
pub const MISSING_FILTER_MESSAGE: &str = "Consider adding a WHERE clause to filter results";

static QUERY_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(ASK|TELL|FIND|SHOW|GET)\b").expect("valid regex"));

static STATEMENT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(ASK|TELL|FIND|SHOW|GET)\b").expect("valid regex"));

static PLEASE_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bPLEASE\b\s*$").expect("valid regex"));

static FIND_FROM_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bFIND\b.*\bFROM\b[^;]*").expect("valid regex"));

static FILTER_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(WHERE|THAT|WHICH|IF|WHEN)\b").expect("valid regex"));

/// Whether a trimmed line ends the current statement
pub fn is_terminated(trimmed: &str) -> bool {
    trimmed.ends_with(';') || PLEASE_TERMINATOR.is_match(trimmed)
}

/// Whether a trimmed line begins with a query-start keyword
pub fn starts_statement(trimmed: &str) -> bool {
    STATEMENT_START.is_match(trimmed)
}

/// Whether a piece of text mentions a query-start keyword anywhere
pub fn contains_query_keyword(text: &str) -> bool {
    QUERY_KEYWORD.is_match(text)
}

/// Trim whitespace and byte-order marks from both ends of a line
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with(COMMENT_MARKER)
}

/// A statement handed back when the accumulator resets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<'a> {
    /// Line index of the first line of the statement
    pub start_line: usize,
    /// Raw lines of the statement, in order
    pub lines: Vec<&'a str>,
}

impl Statement<'_> {
    /// Whether any line of the statement mentions a query-start keyword
    pub fn has_query_keyword(&self) -> bool {
        self.lines.iter().any(|line| contains_query_keyword(line))
    }
}

/// Statement accumulator
///
/// Exists only for the duration of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatementState<'a> {
    /// No statement in progress
    #[default]
    Idle,
    /// Collecting the lines of a statement
    Accumulating(Statement<'a>),
}

impl<'a> StatementState<'a> {
    /// Append a line, recording the start line when idle
    pub fn push(&mut self, index: usize, line: &'a str) {
        match self {
            StatementState::Idle => {
                *self = StatementState::Accumulating(Statement {
                    start_line: index,
                    lines: vec![line],
                });
            }
            StatementState::Accumulating(statement) => statement.lines.push(line),
        }
    }

    /// Return to idle, handing back the statement that was in progress
    pub fn reset(&mut self) -> Option<Statement<'a>> {
        match std::mem::take(self) {
            StatementState::Idle => None,
            StatementState::Accumulating(statement) => Some(statement),
        }
    }

    /// Whether the accumulated lines mention a query-start keyword
    pub fn has_query_keyword(&self) -> bool {
        match self {
            StatementState::Idle => false,
            StatementState::Accumulating(statement) => statement.has_query_keyword(),
        }
    }

    /// Start line of the statement in progress
    pub fn start_line(&self) -> Option<usize> {
        match self {
            StatementState::Idle => None,
            StatementState::Accumulating(statement) => Some(statement.start_line),
        }
    }
}

/// Built-in diagnostic provider
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScanner;

impl HeuristicScanner {
    pub fn new() -> Self {
        Self
    }

    /// Run every check over the document text
    pub fn scan(&self, text: &str) -> Vec<NsqlDiagnostic> {
        let lines = SourceLines::new(text);
        let mut diagnostics = self.check_lines(&lines);
        diagnostics.extend(self.check_missing_filters(text, &lines));
        diagnostics
    }

    /// Statement-termination and unclosed-string checks, in one line pass
    pub fn check_lines(&self, lines: &SourceLines<'_>) -> Vec<NsqlDiagnostic> {
        let mut diagnostics = Vec::new();
        let mut state = StatementState::Idle;

        // Trailing blank and comment lines must not hide the end of the document.
        let last_significant = (0..lines.len()).rev().find(|&i| {
            let trimmed = trim_line(lines.get(i).unwrap_or_default());
            !trimmed.is_empty() && !is_comment(trimmed)
        });

        for (i, line) in lines.iter().enumerate() {
            let trimmed = trim_line(line);

            if is_comment(trimmed) || trimmed.is_empty() {
                continue;
            }

            state.push(i, line);

            if is_terminated(trimmed) {
                state.reset();
            } else {
                let is_last = Some(i) == last_significant;
                let next_is_new_statement = !is_last
                    && lines
                        .get(i + 1)
                        .is_some_and(|next| starts_statement(trim_line(next)))
                    && !state.has_query_keyword();

                if is_last || next_is_new_statement {
                    if let Some(statement) = state.reset()
                        && statement.has_query_keyword()
                    {
                        debug!(
                            "Unterminated statement spanning lines {}..={}",
                            statement.start_line, i
                        );
                        diagnostics.push(
                            NsqlDiagnostic::warning(
                                MISSING_TERMINATOR_MESSAGE,
                                Range::on_line(i as u32, 0, lines.width(i)),
                            )
                            .with_code(DiagnosticCode::MissingTerminator),
                        );
                    }
                }
            }

            if let Some(diagnostic) = check_unclosed_string(i, line, lines.width(i)) {
                diagnostics.push(diagnostic);
            }
        }

        diagnostics
    }

    /// `FIND ... FROM ...` spans lacking a filter keyword
    pub fn check_missing_filters(
        &self,
        text: &str,
        lines: &SourceLines<'_>,
    ) -> Vec<NsqlDiagnostic> {
        FIND_FROM_SPAN
            .find_iter(text)
            .filter(|m| !FILTER_KEYWORD.is_match(m.as_str()))
            .map(|m| {
                let line = line_of_offset(text, m.start());
                NsqlDiagnostic::information(
                    MISSING_FILTER_MESSAGE,
                    Range::on_line(line as u32, 0, lines.width(line)),
                )
                .with_code(DiagnosticCode::MissingFilter)
            })
            .collect()
    }
}

/// Unclosed string check for a single line
///
/// Escaped quotes and multi-line strings are not understood.
pub fn check_unclosed_string(index: usize, line: &str, width: u32) -> Option<NsqlDiagnostic> {
    let quotes = line.chars().filter(|&c| c == '"').count();
    (quotes % 2 != 0).then(|| {
        NsqlDiagnostic::error(
            UNCLOSED_STRING_MESSAGE,
            Range::on_line(index as u32, 0, width),
        )
        .with_code(DiagnosticCode::UnclosedString)
    })
}

#[async_trait::async_trait]
impl DiagnosticProvider for HeuristicScanner {
    fn name(&self) -> &'static str {
        "built-in"
    }

    async fn diagnose(&self, text: &str) -> Vec<NsqlDiagnostic> {
        self.scan(text)
    }
}
