// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! DocumentSync integration tests
//!
//! Incremental edits followed by revalidation.

mod common;

use common::*;
use nsql_lsp::{DocumentSync, EngineConfig};
use tower_lsp::lsp_types::*;

#[tokio::test]
async fn test_incremental_edits_revalidate() {
    let sync = DocumentSync::new(EngineConfig::default());
    let sink = RecordingSink::new();
    let uri = uri("incremental.nsql");

    sync.on_document_open(&sink, open_params(&uri, "FIND users FROM accounts", 1))
        .await;

    // Terminate the statement; the filter hint remains.
    sync.on_document_change(&sink, range_change(&uri, 2, (0, 24), (0, 24), ";"))
        .await
        .unwrap();
    let published = sink.last().await.unwrap();
    assert_eq!(published.version, Some(2));
    assert_eq!(
        severities(&published.diagnostics),
        vec![DiagnosticSeverity::INFORMATION]
    );

    // Add a filter before the semicolon.
    sync.on_document_change(
        &sink,
        range_change(&uri, 3, (0, 24), (0, 24), " WHERE id = 1"),
    )
    .await
    .unwrap();

    let document = sync.documents().get_document(&uri).await.unwrap();
    assert_eq!(document.get_content(), "FIND users FROM accounts WHERE id = 1;");
    assert_eq!(document.version(), 3);
    assert!(sink.last().await.unwrap().diagnostics.is_empty());
}

#[tokio::test]
async fn test_incremental_edit_after_emoji() {
    let sync = DocumentSync::new(EngineConfig::default());
    let sink = RecordingSink::new();
    let uri = uri("emoji.nsql");

    sync.on_document_open(&sink, open_params(&uri, "ASK 😀 \"x", 1))
        .await;
    assert_eq!(
        severities(&sink.last().await.unwrap().diagnostics),
        vec![DiagnosticSeverity::WARNING, DiagnosticSeverity::ERROR]
    );

    // The emoji is two UTF-16 code units, so the line ends at column 9.
    sync.on_document_change(&sink, range_change(&uri, 2, (0, 9), (0, 9), "\";"))
        .await
        .unwrap();

    let document = sync.documents().get_document(&uri).await.unwrap();
    assert_eq!(document.get_content(), "ASK 😀 \"x\";");
    assert!(sink.last().await.unwrap().diagnostics.is_empty());
}

#[tokio::test]
async fn test_multiline_edit() {
    let sync = DocumentSync::new(EngineConfig::default());
    let sink = RecordingSink::new();
    let uri = uri("multiline.nsql");

    sync.on_document_open(&sink, open_params(&uri, "ASK a;\nGET b", 1))
        .await;
    let published = sink.last().await.unwrap();
    assert_eq!(published.diagnostics.len(), 1);
    assert_eq!(published.diagnostics[0].range.start.line, 1);

    // Replace "a;\nGET b" with "a;\nGET b;".
    sync.on_document_change(&sink, range_change(&uri, 2, (0, 4), (1, 5), "a;\nGET b;"))
        .await
        .unwrap();

    let document = sync.documents().get_document(&uri).await.unwrap();
    assert_eq!(document.get_content(), "ASK a;\nGET b;");
    assert!(sink.last().await.unwrap().diagnostics.is_empty());
}

#[tokio::test]
async fn test_invalid_range_leaves_document_untouched() {
    let sync = DocumentSync::new(EngineConfig::default());
    let sink = RecordingSink::new();
    let uri = uri("invalid.nsql");

    sync.on_document_open(&sink, open_params(&uri, "ASK a;", 1))
        .await;

    let result = sync
        .on_document_change(&sink, range_change(&uri, 2, (5, 0), (5, 1), "x"))
        .await;
    assert!(result.is_err());

    let document = sync.documents().get_document(&uri).await.unwrap();
    assert_eq!(document.get_content(), "ASK a;");
    assert_eq!(document.version(), 1);
    assert_eq!(sink.published().await.len(), 1);
}
