// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Document Management
//!
//! This module provides document management for the LSP server.
//!
//! ## Overview
//!
//! The document manager handles:
//! - Document synchronization (open, change, close)
//! - Text content management using Ropey for efficient edits
//! - Document metadata (language ID, version, URI)
//!
//! Positions coming from the client are UTF-16 based; they are converted to
//! rope character offsets before any edit is applied.
//!
//! ## Example
//!
//! ```rust
//! use nsql_lsp::DocumentStore;
//! use tower_lsp::lsp_types::Url;
//!
//! # tokio_test::block_on(async {
//! let store = DocumentStore::new();
//! let uri = Url::parse("file:///report.nsql").unwrap();
//!
//! store.open_document(uri.clone(), "FIND users;".to_string(), 1, "nsql".to_string()).await;
//!
//! let doc = store.get_document(&uri).await.unwrap();
//! assert_eq!(doc.get_content(), "FIND users;");
//! # });
//! ```

use ropey::Rope;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tower_lsp::lsp_types::{
    Position, TextDocumentContentChangeEvent, Url, VersionedTextDocumentIdentifier,
};

/// Document metadata
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    /// Document URI
    pub uri: Url,

    /// Language identifier (e.g., "nsql")
    pub language_id: String,

    /// Document version, as sent by the client
    pub version: i32,

    /// Line count
    pub line_count: usize,
}

impl DocumentMetadata {
    /// Create new document metadata
    pub fn new(uri: Url, language_id: String, version: i32, line_count: usize) -> Self {
        Self {
            uri,
            language_id,
            version,
            line_count,
        }
    }
}

/// A document managed by the LSP server
///
/// Contains the document's content and metadata.
/// Uses Ropey for efficient text manipulation.
#[derive(Debug, Clone)]
pub struct Document {
    /// Document metadata
    metadata: DocumentMetadata,

    /// Document content as a rope for efficient editing
    content: Rope,
}

impl Document {
    /// Create a new document
    pub fn new(uri: Url, content: String, version: i32, language_id: String) -> Self {
        let rope = Rope::from_str(&content);
        let line_count = rope.len_lines();

        let metadata = DocumentMetadata::new(uri, language_id, version, line_count);

        Self {
            metadata,
            content: rope,
        }
    }

    /// Get the document URI
    pub fn uri(&self) -> &Url {
        &self.metadata.uri
    }

    /// Get the document language ID
    pub fn language_id(&self) -> &str {
        &self.metadata.language_id
    }

    /// Get the document version
    pub fn version(&self) -> i32 {
        self.metadata.version
    }

    /// Get the line count
    pub fn line_count(&self) -> usize {
        self.metadata.line_count
    }

    /// Get document metadata
    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Get the full document content as a string
    pub fn get_content(&self) -> String {
        self.content.to_string()
    }

    /// Get a line of text, without its line ending
    pub fn get_line(&self, line: usize) -> Option<String> {
        if line >= self.line_count() {
            return None;
        }

        let line_with_ending = self.content.line(line).to_string();
        Some(line_with_ending.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Convert a protocol position to a rope character offset
    pub fn position_to_char(&self, position: Position) -> Option<usize> {
        position_to_char(&self.content, position)
    }

    /// Apply content changes to the document
    ///
    /// Changes are applied in order. A change without a range replaces the
    /// whole text; `range_length` is ignored when a range is present. If any
    /// change is invalid the document is left untouched.
    pub fn apply_changes(
        &mut self,
        changes: &[TextDocumentContentChangeEvent],
        new_version: i32,
    ) -> Result<(), DocumentError> {
        let mut content = self.content.clone();

        for change in changes {
            match &change.range {
                Some(range) => {
                    let invalid = || DocumentError::InvalidRange {
                        start: (range.start.line, range.start.character),
                        end: (range.end.line, range.end.character),
                    };

                    let start_char = position_to_char(&content, range.start).ok_or_else(invalid)?;
                    let end_char = position_to_char(&content, range.end).ok_or_else(invalid)?;

                    if start_char > end_char {
                        return Err(invalid());
                    }

                    content.remove(start_char..end_char);
                    content.insert(start_char, &change.text);
                }
                None => {
                    content = Rope::from_str(&change.text);
                }
            }
        }

        self.metadata.line_count = content.len_lines();
        self.metadata.version = new_version;
        self.content = content;

        Ok(())
    }
}

/// Convert a protocol position to a character offset in `rope`
///
/// The column is in UTF-16 code units. A column past the end of the line
/// maps to the end of the line; a line past the end of the document is
/// rejected.
fn position_to_char(rope: &Rope, position: Position) -> Option<usize> {
    let line = position.line as usize;
    if line >= rope.len_lines() {
        return None;
    }

    let line_start = rope.line_to_char(line);
    let mut line_end = line_start + rope.line(line).len_chars();
    while line_end > line_start && matches!(rope.char(line_end - 1), '\n' | '\r') {
        line_end -= 1;
    }

    let start_cu = rope.char_to_utf16_cu(line_start);
    let end_cu = rope.char_to_utf16_cu(line_end);
    let target = (start_cu + position.character as usize).min(end_cu);

    Some(rope.utf16_cu_to_char(target))
}

/// Document store for managing multiple documents
///
/// Thread-safe store for all open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    /// Map of document URI to document
    documents: Arc<RwLock<HashMap<Url, Document>>>,

    /// Held from a pass's version check until its publish completes
    publish_lock: Mutex<()>,
}

impl DocumentStore {
    /// Create a new document store
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a document, replacing any document with the same URI
    pub async fn open_document(
        &self,
        uri: Url,
        content: String,
        version: i32,
        language_id: String,
    ) {
        let mut docs = self.documents.write().await;

        let document = Document::new(uri.clone(), content, version, language_id);

        docs.insert(uri, document);
    }

    /// Close a document
    ///
    /// Returns true if the document was closed, false if it didn't exist
    pub async fn close_document(&self, uri: &Url) -> bool {
        let mut docs = self.documents.write().await;
        docs.remove(uri).is_some()
    }

    /// Update a document
    pub async fn update_document(
        &self,
        identifier: &VersionedTextDocumentIdentifier,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Result<(), DocumentError> {
        let mut docs = self.documents.write().await;

        let document = docs
            .get_mut(&identifier.uri)
            .ok_or_else(|| DocumentError::DocumentNotFound(identifier.uri.clone()))?;

        document.apply_changes(changes, identifier.version)
    }

    /// Get a snapshot of a document by URI
    pub async fn get_document(&self, uri: &Url) -> Option<Document> {
        let docs = self.documents.read().await;
        docs.get(uri).cloned()
    }

    /// Current version of a document, or None once it is closed
    pub async fn current_version(&self, uri: &Url) -> Option<i32> {
        let docs = self.documents.read().await;
        docs.get(uri).map(Document::version)
    }

    /// Check if a document exists
    pub async fn has_document(&self, uri: &Url) -> bool {
        let docs = self.documents.read().await;
        docs.contains_key(uri)
    }

    /// Get all document URIs
    pub async fn list_uris(&self) -> Vec<Url> {
        let docs = self.documents.read().await;
        docs.keys().cloned().collect()
    }

    /// Get the number of open documents
    pub async fn document_count(&self) -> usize {
        let docs = self.documents.read().await;
        docs.len()
    }

    /// Serialize diagnostics publishing
    ///
    /// Edits do not wait on this lock; only publishers do.
    pub async fn lock_publish(&self) -> MutexGuard<'_, ()> {
        self.publish_lock.lock().await
    }
}

/// Document-related errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(Url),

    /// Invalid range for text operation
    #[error("Invalid range: start={start:?}, end={end:?}")]
    InvalidRange { start: (u32, u32), end: (u32, u32) },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Range;

    fn create_test_uri() -> Url {
        Url::parse("file:///test.nsql").unwrap()
    }

    fn edit(start: (u32, u32), end: (u32, u32), text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: Some(Range::new(
                Position::new(start.0, start.1),
                Position::new(end.0, end.1),
            )),
            range_length: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_document_new() {
        let uri = create_test_uri();
        let doc = Document::new(uri.clone(), "FIND users;".to_string(), 1, "nsql".to_string());

        assert_eq!(doc.uri(), &uri);
        assert_eq!(doc.language_id(), "nsql");
        assert_eq!(doc.version(), 1);
        assert_eq!(doc.get_content(), "FIND users;");
    }

    #[test]
    fn test_document_get_line() {
        let content = "FIND users\r\nFROM accounts\nWHERE age > 3;";
        let doc = Document::new(create_test_uri(), content.to_string(), 1, "nsql".to_string());

        assert_eq!(doc.get_line(0), Some("FIND users".to_string()));
        assert_eq!(doc.get_line(1), Some("FROM accounts".to_string()));
        assert_eq!(doc.get_line(2), Some("WHERE age > 3;".to_string()));
        assert_eq!(doc.get_line(3), None);
    }

    #[test]
    fn test_position_to_char_utf16() {
        let doc = Document::new(create_test_uri(), "😀 GET\nASK".to_string(), 1, "nsql".to_string());

        // The emoji is two UTF-16 units but one char.
        assert_eq!(doc.position_to_char(Position::new(0, 0)), Some(0));
        assert_eq!(doc.position_to_char(Position::new(0, 3)), Some(2));
        // Past the end of the line clamps to the line end.
        assert_eq!(doc.position_to_char(Position::new(0, 99)), Some(5));
        assert_eq!(doc.position_to_char(Position::new(1, 1)), Some(7));
        assert_eq!(doc.position_to_char(Position::new(2, 0)), None);
    }

    #[test]
    fn test_document_apply_changes_full() {
        let mut doc = Document::new(create_test_uri(), "old".to_string(), 1, "nsql".to_string());

        let changes = vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "ASK a;\nGET b;".to_string(),
        }];

        doc.apply_changes(&changes, 2).unwrap();

        assert_eq!(doc.get_content(), "ASK a;\nGET b;");
        assert_eq!(doc.version(), 2);
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_document_apply_changes_incremental() {
        let mut doc = Document::new(
            create_test_uri(),
            "FIND users FROM accounts".to_string(),
            1,
            "nsql".to_string(),
        );

        let mut change = edit((0, 5), (0, 10), "orders");
        change.range_length = Some(5);
        doc.apply_changes(&[change, edit((0, 25), (0, 25), ";")], 2)
            .unwrap();

        assert_eq!(doc.get_content(), "FIND orders FROM accounts;");
        assert_eq!(doc.version(), 2);
    }

    #[test]
    fn test_document_apply_changes_across_lines() {
        let mut doc = Document::new(
            create_test_uri(),
            "ASK a\nTELL b\nGET c;".to_string(),
            1,
            "nsql".to_string(),
        );

        doc.apply_changes(&[edit((0, 5), (1, 6), ";")], 2).unwrap();

        assert_eq!(doc.get_content(), "ASK a;\nGET c;");
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_document_apply_changes_after_emoji() {
        let mut doc = Document::new(create_test_uri(), "GET 😀 x".to_string(), 1, "nsql".to_string());

        // "GET " is 4 units, the emoji 2, the space 1.
        doc.apply_changes(&[edit((0, 7), (0, 8), "y;")], 2).unwrap();

        assert_eq!(doc.get_content(), "GET 😀 y;");
    }

    #[test]
    fn test_document_apply_changes_after_unicode_separator() {
        let mut doc = Document::new(
            create_test_uri(),
            "GET a;\u{2028}GET b;\nASK c".to_string(),
            1,
            "nsql".to_string(),
        );
        assert_eq!(doc.line_count(), 2);

        doc.apply_changes(&[edit((1, 5), (1, 5), ";")], 2).unwrap();

        assert_eq!(doc.get_content(), "GET a;\u{2028}GET b;\nASK c;");
        assert_eq!(doc.get_line(0), Some("GET a;\u{2028}GET b;".to_string()));
    }

    #[test]
    fn test_document_lone_cr_is_a_line_break() {
        let mut doc = Document::new(create_test_uri(), "GET a\rASK b".to_string(), 1, "nsql".to_string());
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.get_line(0), Some("GET a".to_string()));

        doc.apply_changes(&[edit((1, 5), (1, 5), ";")], 2).unwrap();
        assert_eq!(doc.get_content(), "GET a\rASK b;");
    }

    #[test]
    fn test_document_apply_changes_invalid_range() {
        let mut doc = Document::new(create_test_uri(), "GET x".to_string(), 1, "nsql".to_string());

        let result = doc.apply_changes(&[edit((0, 0), (10, 0), "x")], 2);
        assert!(matches!(result, Err(DocumentError::InvalidRange { .. })));

        let result = doc.apply_changes(&[edit((0, 4), (0, 2), "x")], 2);
        assert!(matches!(result, Err(DocumentError::InvalidRange { .. })));

        assert_eq!(doc.get_content(), "GET x");
        assert_eq!(doc.version(), 1);
    }

    #[tokio::test]
    async fn test_document_store_open_and_close() {
        let store = DocumentStore::new();
        let uri = create_test_uri();

        store
            .open_document(uri.clone(), "GET x;".to_string(), 1, "nsql".to_string())
            .await;

        assert!(store.has_document(&uri).await);
        assert_eq!(store.document_count().await, 1);
        assert_eq!(store.current_version(&uri).await, Some(1));

        assert!(store.close_document(&uri).await);
        assert!(!store.has_document(&uri).await);
        assert_eq!(store.current_version(&uri).await, None);
        assert!(!store.close_document(&uri).await);
    }

    #[tokio::test]
    async fn test_document_store_update() {
        let store = DocumentStore::new();
        let uri = create_test_uri();

        store
            .open_document(uri.clone(), "old".to_string(), 1, "nsql".to_string())
            .await;

        let identifier = VersionedTextDocumentIdentifier {
            uri: uri.clone(),
            version: 2,
        };

        let changes = vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new".to_string(),
        }];

        store.update_document(&identifier, &changes).await.unwrap();

        let doc = store.get_document(&uri).await.unwrap();
        assert_eq!(doc.get_content(), "new");
        assert_eq!(store.current_version(&uri).await, Some(2));
    }

    #[tokio::test]
    async fn test_document_store_update_missing() {
        let store = DocumentStore::new();
        let identifier = VersionedTextDocumentIdentifier {
            uri: create_test_uri(),
            version: 2,
        };

        let result = store.update_document(&identifier, &[]).await;
        assert!(matches!(result, Err(DocumentError::DocumentNotFound(_))));
    }

    #[tokio::test]
    async fn test_document_store_list_uris() {
        let store = DocumentStore::new();
        let uri1 = Url::parse("file:///one.nsql").unwrap();
        let uri2 = Url::parse("file:///two.nsql").unwrap();

        store
            .open_document(uri1.clone(), "ASK 1;".to_string(), 1, "nsql".to_string())
            .await;
        store
            .open_document(uri2.clone(), "ASK 2;".to_string(), 1, "nsql".to_string())
            .await;

        let uris = store.list_uris().await;
        assert_eq!(uris.len(), 2);
        assert!(uris.contains(&uri1));
        assert!(uris.contains(&uri2));
    }
}
