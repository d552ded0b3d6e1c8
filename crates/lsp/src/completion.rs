// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Keyword Completion
//!
//! Completion offers the whole keyword catalogue regardless of context. Each
//! item carries its category tag in `data`; resolving an item fills in the
//! detail and documentation for that tag.

use nsql_lsp_keywords::{
    FALLBACK_DETAIL, FALLBACK_DOCUMENTATION, KeywordCatalog, KeywordCategory, KeywordKind,
    NsqlKeyword,
};
use serde_json::Value;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Documentation};

/// Completion engine for NSQL keywords
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionEngine {
    catalog: KeywordCatalog,
}

impl CompletionEngine {
    /// Create a new completion engine
    pub fn new() -> Self {
        Self::default()
    }

    /// All keyword items, in catalogue order
    pub fn complete(&self) -> Vec<CompletionItem> {
        self.catalog.all().iter().map(keyword_item).collect()
    }

    /// Fill in detail and documentation from the item's category tag
    pub fn resolve(&self, mut item: CompletionItem) -> CompletionItem {
        let category = item
            .data
            .as_ref()
            .and_then(Value::as_str)
            .and_then(KeywordCategory::from_tag);

        let (detail, documentation) = match category {
            Some(category) => (
                category.detail().to_string(),
                category.documentation(&item.label),
            ),
            None => (
                FALLBACK_DETAIL.to_string(),
                FALLBACK_DOCUMENTATION.to_string(),
            ),
        };

        item.detail = Some(detail);
        item.documentation = Some(Documentation::String(documentation));
        item
    }
}

fn completion_kind(kind: KeywordKind) -> CompletionItemKind {
    match kind {
        KeywordKind::Keyword => CompletionItemKind::KEYWORD,
        KeywordKind::Operator => CompletionItemKind::OPERATOR,
        KeywordKind::Value => CompletionItemKind::VALUE,
        KeywordKind::TypeParameter => CompletionItemKind::TYPE_PARAMETER,
    }
}

fn keyword_item(keyword: &NsqlKeyword) -> CompletionItem {
    CompletionItem {
        label: keyword.label.to_string(),
        kind: Some(completion_kind(keyword.kind)),
        data: Some(Value::String(keyword.category.tag().to_string())),
        ..Default::default()
    }
}
