// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # NSQL LSP - Language Server Protocol
//!
//! This crate provides the LSP server implementation for NSQL.
//!
//! ## Overview
//!
//! The LSP server provides:
//! - Diagnostics from the built-in heuristic scanner or an external parser
//! - Keyword completion with lazily resolved documentation
//! - Keyword and identifier hover
//! - Incremental document synchronization
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Client (VS Code, etc.)          │
//! └──────────────┬──────────────────────────┘
//!                │ LSP Protocol
//!                ↓
//! ┌─────────────────────────────────────────┐
//! │         LSP Backend (tower-lsp)         │
//! ├─────────────────────────────────────────┤
//! │  • did_open / did_change / did_close    │
//! │  • completion / hover / diagnostics     │
//! └──────────────┬──────────────────────────┘
//!                │
//!         ┌──────┴──────┬────────────────┐
//!         ↓             ↓                ↓
//! ┌────────────┐ ┌──────────────┐ ┌──────────────┐
//! │  Document  │ │  Validation  │ │   Keyword    │
//! │    Sync    │ │    Engine    │ │  Catalogue   │
//! └────────────┘ └──────────────┘ └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nsql_lsp::LspBackend;
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let stdin = tokio::io::stdin();
//!     let stdout = tokio::io::stdout();
//!
//!     let (service, socket) = LspService::new(LspBackend::new);
//!     Server::new(stdin, stdout, socket).serve(service).await;
//! }
//! ```
//!
//! ### Configuration
//!
//! Settings arrive through `initializationOptions` or
//! `workspace/didChangeConfiguration`:
//!
//! ```json
//! {
//!   "nsql": {
//!     "parserPath": "/usr/local/bin/nsql-parser",
//!     "parserTimeoutMs": 5000
//!   }
//! }
//! ```
//!
//! Without settings, the `NSQL_PARSER_PATH` environment variable is used.
//! When no parser executable exists at the configured path, the built-in
//! scanner validates documents.
//!
//! ## Modules
//!
//! - [`backend`]: Main LSP server implementation
//! - [`sync`]: Document lifecycle and revalidation
//! - [`document`]: Document management and storage
//! - [`diagnostic`]: Diagnostic conversion and publishing
//! - [`completion`]: Keyword completion
//! - [`hover`]: Keyword hover
//! - [`config`]: Server configuration and client capabilities
//!
//! ## Error Handling
//!
//! Nothing a document contains is fatal:
//! - Malformed text → diagnostics
//! - Missing parser → built-in scanner
//! - Parser failure → one synthetic error diagnostic
//! - Invalid settings → warning, previous configuration kept

pub mod backend;
pub mod completion;
pub mod config;
pub mod diagnostic;
pub mod document;
pub mod hover;
pub mod sync;

// Re-exports for convenience
pub use backend::{LspBackend, LspError, REVALIDATE_COMMAND, SERVER_INFO_COMMAND};
pub use completion::CompletionEngine;
pub use config::{ClientFlags, ConfigError, EngineConfig, PARSER_PATH_ENV, SETTINGS_SECTION};
pub use diagnostic::{
    DiagnosticSink, clear_diagnostics, publish_diagnostics_for_document, to_lsp,
};
pub use document::{Document, DocumentError, DocumentMetadata, DocumentStore};
pub use hover::{HoverEngine, WordAt, word_at};
pub use sync::DocumentSync;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name
pub const SERVER_NAME: &str = "nsql-lsp";

/// Human-readable server name
pub const SERVER_DISPLAY_NAME: &str = "NSQL Language Server";
