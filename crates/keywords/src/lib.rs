// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # NSQL Keywords
//!
//! Static keyword catalogue shared by completion, completion-resolve and hover.
//!
//! Keywords are grouped into categories (query, clause, action, operator,
//! literal, type, constraint, definition). The category tag is what the
//! server stores in a completion item's `data` field; resolving an item maps
//! the tag back to its detail and documentation strings.

pub mod catalog;
pub mod hover;

pub use catalog::{
    FALLBACK_DETAIL, FALLBACK_DOCUMENTATION, KeywordCatalog, KeywordCategory, KeywordKind,
    NsqlKeyword,
};
pub use hover::KeywordHoverProvider;
