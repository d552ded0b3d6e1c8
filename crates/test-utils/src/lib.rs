// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for nsql-lsp
//!
//! This crate provides common testing components including:
//! - A mock diagnostic provider
//! - Sample NSQL documents and parser reports
//! - Diagnostic assertions
//! - Cursor-marker helpers for position-based requests

pub mod assertions;
pub mod cursor;
pub mod fixtures;
pub mod mock_provider;

// Re-exports for convenience
pub use assertions::DiagnosticAssertions;
pub use cursor::{get_cursor_offset, remove_cursor_marker, split_cursor};
pub use fixtures::NsqlFixtures;
pub use mock_provider::MockProvider;
