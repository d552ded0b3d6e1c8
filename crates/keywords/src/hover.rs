// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Hover Text for Words
//!
//! Renders the markdown shown when hovering a word in an NSQL document.
//!
//! ```rust
//! use nsql_lsp_keywords::KeywordHoverProvider;
//!
//! let provider = KeywordHoverProvider::new();
//! assert!(provider.hover_markdown("find").starts_with("**Keyword:** `FIND`"));
//! assert_eq!(provider.hover_markdown("users"), "Identifier: `users`");
//! ```

use crate::catalog::KeywordCatalog;

/// Hover information provider for NSQL words
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordHoverProvider {
    catalog: KeywordCatalog,
}

impl KeywordHoverProvider {
    /// Create a new hover info provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Markdown for a hovered word
    ///
    /// Words that appear in any keyword label are rendered as keywords;
    /// anything else is rendered as a plain identifier.
    pub fn hover_markdown(&self, word: &str) -> String {
        let upper = word.to_uppercase();

        if !self.catalog.is_keyword_word(&upper) {
            return format!("Identifier: `{}`", word);
        }

        match self.catalog.get(&upper) {
            Some(keyword) => format!(
                "**Keyword:** `{}`\n\n{}\n\n{}",
                upper,
                keyword.detail(),
                keyword.documentation()
            ),
            None => format!("**Keyword:** `{}`\n\nNSQL language keyword.", upper),
        }
    }
}
