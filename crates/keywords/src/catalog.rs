// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # NSQL Keyword Catalogue
//!
//! This module defines the fixed set of NSQL keywords, grouped by category.

use serde::{Deserialize, Serialize};

/// Keyword category
///
/// The category tag travels with completion items (as `data`) so that the
/// resolve step can synthesize detail and documentation strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCategory {
    /// Statement starters (ASK, TELL, FIND, SHOW, GET)
    Query,
    /// Clauses (FROM, WHERE, ORDER BY, ...)
    Clause,
    /// TELL actions (ADD, REMOVE, ...)
    Action,
    /// Operators and conditions
    Operator,
    /// Literal values
    Literal,
    /// Data types
    Type,
    /// Column constraints
    Constraint,
    /// Structure definitions
    Definition,
}

impl KeywordCategory {
    /// All categories, in catalogue order
    pub const ALL: [KeywordCategory; 8] = [
        KeywordCategory::Query,
        KeywordCategory::Clause,
        KeywordCategory::Action,
        KeywordCategory::Operator,
        KeywordCategory::Literal,
        KeywordCategory::Type,
        KeywordCategory::Constraint,
        KeywordCategory::Definition,
    ];

    /// Get the tag string stored in completion item data
    pub fn tag(&self) -> &'static str {
        match self {
            KeywordCategory::Query => "query",
            KeywordCategory::Clause => "clause",
            KeywordCategory::Action => "action",
            KeywordCategory::Operator => "operator",
            KeywordCategory::Literal => "literal",
            KeywordCategory::Type => "type",
            KeywordCategory::Constraint => "constraint",
            KeywordCategory::Definition => "definition",
        }
    }

    /// Parse a category from its tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.tag() == tag)
    }

    /// Short detail line shown next to a resolved completion item
    pub fn detail(&self) -> &'static str {
        match self {
            KeywordCategory::Query => "NSQL Query Type",
            KeywordCategory::Clause => "NSQL Clause",
            KeywordCategory::Action => "NSQL TELL Action",
            KeywordCategory::Operator => "NSQL Operator",
            KeywordCategory::Literal => "NSQL Literal Value",
            KeywordCategory::Type => "NSQL Data Type",
            KeywordCategory::Constraint => "NSQL Constraint",
            KeywordCategory::Definition => "NSQL Definition Keyword",
        }
    }

    /// Documentation sentence for a keyword of this category
    pub fn documentation(&self, label: &str) -> String {
        match self {
            KeywordCategory::Query => format!("Starts a {} query.", label),
            KeywordCategory::Clause => format!("Specifies the {} part of a query.", label),
            KeywordCategory::Action => format!("Performs the {} action in a TELL query.", label),
            KeywordCategory::Operator => format!("Used in conditions (e.g., WHERE {} ...).", label),
            KeywordCategory::Literal => format!("Represents the value {}.", label),
            KeywordCategory::Type => format!("Specifies the data type {}.", label),
            KeywordCategory::Constraint => format!("Defines a {} constraint.", label),
            KeywordCategory::Definition => {
                format!("Used for defining structures like {}.", label)
            }
        }
    }
}

/// Detail used when a completion item carries no known category
pub const FALLBACK_DETAIL: &str = "NSQL Keyword";

/// Documentation used when a completion item carries no known category
pub const FALLBACK_DOCUMENTATION: &str = "A keyword in the NSQL language.";

/// How a keyword is presented in the completion list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    Keyword,
    Operator,
    Value,
    TypeParameter,
}

/// NSQL keyword with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsqlKeyword {
    /// Canonical label (may span several words, e.g. "GROUP BY")
    pub label: &'static str,
    /// Category tag
    pub category: KeywordCategory,
    /// Completion presentation
    pub kind: KeywordKind,
}

impl NsqlKeyword {
    const fn new(label: &'static str, category: KeywordCategory, kind: KeywordKind) -> Self {
        Self {
            label,
            category,
            kind,
        }
    }

    /// Detail string for this keyword
    pub fn detail(&self) -> &'static str {
        self.category.detail()
    }

    /// Documentation string for this keyword
    pub fn documentation(&self) -> String {
        self.category.documentation(self.label)
    }

    /// Individual words of the label
    pub fn words(&self) -> impl Iterator<Item = &'static str> {
        self.label.split_whitespace()
    }
}

use KeywordCategory as C;
use KeywordKind as K;

static KEYWORDS: [NsqlKeyword; 48] = [
    // Query types
    NsqlKeyword::new("ASK", C::Query, K::Keyword),
    NsqlKeyword::new("TELL", C::Query, K::Keyword),
    NsqlKeyword::new("FIND", C::Query, K::Keyword),
    NsqlKeyword::new("SHOW", C::Query, K::Keyword),
    NsqlKeyword::new("GET", C::Query, K::Keyword),
    // Clauses
    NsqlKeyword::new("FOR", C::Clause, K::Keyword),
    NsqlKeyword::new("FROM", C::Clause, K::Keyword),
    NsqlKeyword::new("WHERE", C::Clause, K::Keyword),
    NsqlKeyword::new("WHEN", C::Clause, K::Keyword),
    NsqlKeyword::new("IF", C::Clause, K::Keyword),
    NsqlKeyword::new("JOIN", C::Clause, K::Keyword),
    NsqlKeyword::new("ON", C::Clause, K::Keyword),
    NsqlKeyword::new("GROUP BY", C::Clause, K::Keyword),
    NsqlKeyword::new("ORDER BY", C::Clause, K::Keyword),
    NsqlKeyword::new("SORT BY", C::Clause, K::Keyword),
    NsqlKeyword::new("LIMIT", C::Clause, K::Keyword),
    NsqlKeyword::new("AS", C::Clause, K::Keyword),
    // TELL actions
    NsqlKeyword::new("ADD", C::Action, K::Keyword),
    NsqlKeyword::new("REMOVE", C::Action, K::Keyword),
    NsqlKeyword::new("UPDATE", C::Action, K::Keyword),
    NsqlKeyword::new("CREATE", C::Action, K::Keyword),
    NsqlKeyword::new("RECORD", C::Action, K::Keyword),
    NsqlKeyword::new("FIELD", C::Action, K::Keyword),
    // Operators / conditions
    NsqlKeyword::new("AND", C::Operator, K::Operator),
    NsqlKeyword::new("OR", C::Operator, K::Operator),
    NsqlKeyword::new("NOT", C::Operator, K::Operator),
    NsqlKeyword::new("IN", C::Operator, K::Operator),
    NsqlKeyword::new("LIKE", C::Operator, K::Operator),
    NsqlKeyword::new("IS NULL", C::Operator, K::Operator),
    NsqlKeyword::new("IS NOT NULL", C::Operator, K::Operator),
    // Literals
    NsqlKeyword::new("TRUE", C::Literal, K::Value),
    NsqlKeyword::new("FALSE", C::Literal, K::Value),
    NsqlKeyword::new("NULL", C::Literal, K::Value),
    // Types
    NsqlKeyword::new("INTEGER", C::Type, K::TypeParameter),
    NsqlKeyword::new("DECIMAL", C::Type, K::TypeParameter),
    NsqlKeyword::new("STRING", C::Type, K::TypeParameter),
    NsqlKeyword::new("BOOLEAN", C::Type, K::TypeParameter),
    NsqlKeyword::new("DATE", C::Type, K::TypeParameter),
    NsqlKeyword::new("DATETIME", C::Type, K::TypeParameter),
    // Constraints / definitions
    NsqlKeyword::new("PRIMARY KEY", C::Constraint, K::Keyword),
    NsqlKeyword::new("UNIQUE", C::Constraint, K::Keyword),
    NsqlKeyword::new("INDEX", C::Definition, K::Keyword),
    NsqlKeyword::new("CONSTRAINT", C::Definition, K::Keyword),
    NsqlKeyword::new("CHECK", C::Constraint, K::Keyword),
    NsqlKeyword::new("DEFAULT", C::Constraint, K::Keyword),
    NsqlKeyword::new("AUTOINCREMENT", C::Constraint, K::Keyword),
    // Terminator and filter words
    NsqlKeyword::new("PLEASE", C::Clause, K::Keyword),
    NsqlKeyword::new("THAT", C::Clause, K::Keyword),
];

/// Read-only view over the keyword catalogue
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordCatalog;

impl KeywordCatalog {
    /// Create a catalogue handle
    pub fn new() -> Self {
        Self
    }

    /// All keywords in catalogue order
    pub fn all(&self) -> &'static [NsqlKeyword] {
        &KEYWORDS
    }

    /// Keywords belonging to one category
    pub fn by_category(&self, category: KeywordCategory) -> impl Iterator<Item = &'static NsqlKeyword> {
        KEYWORDS.iter().filter(move |k| k.category == category)
    }

    /// Look up a keyword by its full label (case-insensitive)
    pub fn get(&self, label: &str) -> Option<&'static NsqlKeyword> {
        KEYWORDS.iter().find(|k| k.label.eq_ignore_ascii_case(label))
    }

    /// Check whether a single word appears in any keyword label
    ///
    /// `GROUP` and `BY` are keyword words even though only `GROUP BY` is a label.
    pub fn is_keyword_word(&self, word: &str) -> bool {
        KEYWORDS
            .iter()
            .flat_map(|k| k.words())
            .any(|w| w.eq_ignore_ascii_case(word))
    }
}
