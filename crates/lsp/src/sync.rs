// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Document Synchronization
//!
//! Ties the document store to the validation engine.
//!
//! ## Overview
//!
//! The sync module handles:
//! - Document lifecycle integration (open, change, close)
//! - Revalidation after every open and change
//! - Engine reconfiguration and revalidation of all open documents
//!
//! ## Architecture
//!
//! ```text
//! DocumentSync
//!     ├─→ DocumentStore (text and versions)
//!     ├─→ ValidationEngine (rebuilt on config change)
//!     └─→ DiagnosticSink (client, or a recorder in tests)
//!           ↓
//!        on_document_open()
//!        on_document_change()
//!        on_document_close()
//! ```
//!
//! Nothing here is tied to `tower_lsp::Client`, so the whole lifecycle can be
//! driven from tests.

use std::sync::Arc;

use nsql_lsp_validation::ValidationEngine;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams, Url,
};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::diagnostic::{DiagnosticSink, clear_diagnostics, publish_diagnostics_for_document};
use crate::document::{DocumentError, DocumentStore};

/// Document synchronization manager
#[derive(Debug, Clone)]
pub struct DocumentSync {
    documents: Arc<DocumentStore>,
    config: Arc<RwLock<EngineConfig>>,
    engine: Arc<RwLock<ValidationEngine>>,
    /// Whether config changes rebuild the engine
    follows_config: bool,
}

impl DocumentSync {
    /// Create a sync manager whose engine follows `config`
    pub fn new(config: EngineConfig) -> Self {
        let engine = ValidationEngine::from_config(config.validation.clone());
        Self {
            documents: Arc::new(DocumentStore::new()),
            config: Arc::new(RwLock::new(config)),
            engine: Arc::new(RwLock::new(engine)),
            follows_config: true,
        }
    }

    /// Create a sync manager with a fixed engine
    ///
    /// Configuration updates are still recorded but do not replace the engine.
    pub fn with_engine(engine: ValidationEngine) -> Self {
        Self {
            documents: Arc::new(DocumentStore::new()),
            config: Arc::new(RwLock::new(EngineConfig::default())),
            engine: Arc::new(RwLock::new(engine)),
            follows_config: false,
        }
    }

    /// Get the document store
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Get the current engine configuration
    pub async fn config(&self) -> EngineConfig {
        self.config.read().await.clone()
    }

    /// Name of the validator the next pass will use
    pub async fn validator_name(&self) -> &'static str {
        self.engine.read().await.validator_name()
    }

    /// Replace the configuration and rebuild the engine
    ///
    /// Returns false when the configuration did not change.
    pub async fn set_config(&self, config: EngineConfig) -> bool {
        let mut current = self.config.write().await;
        if *current == config {
            return false;
        }

        info!(
            "Engine configuration updated: parser={:?}, timeout={:?}",
            config.validation.parser_path, config.validation.parser_timeout
        );
        if self.follows_config {
            *self.engine.write().await = ValidationEngine::from_config(config.validation.clone());
        }
        *current = config;
        true
    }

    /// Validate one document and publish its diagnostics
    pub async fn validate(&self, sink: &dyn DiagnosticSink, uri: &Url) -> Option<usize> {
        let engine = self.engine.read().await.clone();
        publish_diagnostics_for_document(&engine, &self.documents, sink, uri).await
    }

    /// Validate every open document
    ///
    /// Returns the number of documents whose diagnostics were published.
    pub async fn revalidate_all(&self, sink: &dyn DiagnosticSink) -> usize {
        let mut published = 0;
        for uri in self.documents.list_uris().await {
            if self.validate(sink, &uri).await.is_some() {
                published += 1;
            }
        }
        published
    }

    /// Handle `textDocument/didOpen`
    pub async fn on_document_open(
        &self,
        sink: &dyn DiagnosticSink,
        params: DidOpenTextDocumentParams,
    ) -> Option<usize> {
        let doc = params.text_document;
        let uri = doc.uri;

        info!(
            "Document opened: uri={}, language={}, version={}",
            uri, doc.language_id, doc.version
        );

        self.documents
            .open_document(uri.clone(), doc.text, doc.version, doc.language_id)
            .await;

        self.validate(sink, &uri).await
    }

    /// Handle `textDocument/didChange`
    pub async fn on_document_change(
        &self,
        sink: &dyn DiagnosticSink,
        params: DidChangeTextDocumentParams,
    ) -> Result<Option<usize>, DocumentError> {
        let identifier = params.text_document;

        info!(
            "Document changed: uri={}, version={}, changes={}",
            identifier.uri,
            identifier.version,
            params.content_changes.len()
        );

        self.documents
            .update_document(&identifier, &params.content_changes)
            .await?;

        Ok(self.validate(sink, &identifier.uri).await)
    }

    /// Handle `textDocument/didClose`
    ///
    /// Diagnostics are cleared even if the document was not known.
    pub async fn on_document_close(
        &self,
        sink: &dyn DiagnosticSink,
        params: DidCloseTextDocumentParams,
    ) -> bool {
        let uri = params.text_document.uri;
        info!("Document closed: uri={}", uri);

        let closed = self.documents.close_document(&uri).await;
        if !closed {
            warn!("Document not found for close: {}", uri);
        }

        clear_diagnostics(&self.documents, sink, &uri).await;
        closed
    }
}
