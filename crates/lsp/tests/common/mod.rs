// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Shared helpers for LSP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use nsql_lsp::DiagnosticSink;
use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;

/// One `publishDiagnostics` notification
#[derive(Debug, Clone)]
pub struct Published {
    pub uri: Url,
    pub diagnostics: Vec<Diagnostic>,
    pub version: Option<i32>,
}

/// Sink that records every publish instead of sending it
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    published: Arc<Mutex<Vec<Published>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn published(&self) -> Vec<Published> {
        self.published.lock().await.clone()
    }

    pub async fn last(&self) -> Option<Published> {
        self.published.lock().await.last().cloned()
    }
}

#[async_trait::async_trait]
impl DiagnosticSink for RecordingSink {
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>) {
        self.published.lock().await.push(Published {
            uri,
            diagnostics,
            version,
        });
    }
}

pub fn uri(name: &str) -> Url {
    Url::parse(&format!("file:///{}", name)).unwrap()
}

pub fn open_params(uri: &Url, text: &str, version: i32) -> DidOpenTextDocumentParams {
    DidOpenTextDocumentParams {
        text_document: TextDocumentItem {
            uri: uri.clone(),
            language_id: "nsql".to_string(),
            version,
            text: text.to_string(),
        },
    }
}

pub fn full_change(uri: &Url, text: &str, version: i32) -> DidChangeTextDocumentParams {
    DidChangeTextDocumentParams {
        text_document: VersionedTextDocumentIdentifier {
            uri: uri.clone(),
            version,
        },
        content_changes: vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: text.to_string(),
        }],
    }
}

pub fn range_change(
    uri: &Url,
    version: i32,
    start: (u32, u32),
    end: (u32, u32),
    text: &str,
) -> DidChangeTextDocumentParams {
    DidChangeTextDocumentParams {
        text_document: VersionedTextDocumentIdentifier {
            uri: uri.clone(),
            version,
        },
        content_changes: vec![TextDocumentContentChangeEvent {
            range: Some(Range::new(
                Position::new(start.0, start.1),
                Position::new(end.0, end.1),
            )),
            range_length: None,
            text: text.to_string(),
        }],
    }
}

pub fn close_params(uri: &Url) -> DidCloseTextDocumentParams {
    DidCloseTextDocumentParams {
        text_document: TextDocumentIdentifier { uri: uri.clone() },
    }
}

pub fn severities(diagnostics: &[Diagnostic]) -> Vec<DiagnosticSeverity> {
    diagnostics.iter().filter_map(|d| d.severity).collect()
}
