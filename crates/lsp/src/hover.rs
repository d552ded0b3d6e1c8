// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Hover Information Provider
//!
//! Finds the word under the cursor and renders keyword or identifier
//! markdown for it.
//!
//! ## Example
//!
//! ```text
//! FIND users FR|OM accounts
//! ```
//!
//! The cursor is inside `FROM`, so the hover shows the FROM keyword entry and
//! its range covers columns 11..15.

use std::sync::LazyLock;

use nsql_lsp_keywords::KeywordHoverProvider;
use regex::Regex;
use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position, Range};

use crate::document::Document;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").expect("valid regex"));

/// A word on a line, with its UTF-16 column span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAt {
    pub word: String,
    pub start: u32,
    pub end: u32,
}

/// Find the word containing `column` (UTF-16) on `line`
///
/// The end of a word counts as inside it, so a cursor just after the last
/// letter still hovers that word. The first matching word wins.
pub fn word_at(line: &str, column: u32) -> Option<WordAt> {
    let column = column as usize;

    WORD.find_iter(line).find_map(|m| {
        let start = line[..m.start()].encode_utf16().count();
        let end = start + m.as_str().encode_utf16().count();

        (start <= column && column <= end).then(|| WordAt {
            word: m.as_str().to_string(),
            start: start as u32,
            end: end as u32,
        })
    })
}

/// Hover engine for NSQL documents
#[derive(Debug, Clone, Copy, Default)]
pub struct HoverEngine {
    provider: KeywordHoverProvider,
}

impl HoverEngine {
    /// Create a new hover engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Get hover information for a position in a document
    pub fn hover(&self, document: &Document, position: Position) -> Option<Hover> {
        let line = document.get_line(position.line as usize)?;
        let found = word_at(&line, position.character)?;

        Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: self.provider.hover_markdown(&found.word),
            }),
            range: Some(Range::new(
                Position::new(position.line, found.start),
                Position::new(position.line, found.end),
            )),
        })
    }
}
