// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # NSQL Validation Engine
//!
//! Produces diagnostics for NSQL documents.
//!
//! ## Providers
//!
//! - [`HeuristicScanner`]: built-in, line-oriented pattern checks
//! - [`ExternalParser`]: delegates to a native parser executable and
//!   translates its JSON error report
//!
//! [`ValidationEngine`] chooses between them per pass based on
//! [`ValidationConfig`].
//!
//! ## Example
//!
//! ```rust
//! use nsql_lsp_validation::{Severity, ValidationConfig, ValidationEngine};
//!
//! # tokio_test::block_on(async {
//! let engine = ValidationEngine::from_config(ValidationConfig::builtin());
//! let diagnostics = engine.validate("FIND users FROM accounts").await;
//!
//! assert_eq!(diagnostics[0].severity, Severity::Warning);
//! assert_eq!(diagnostics[1].severity, Severity::Information);
//! # });
//! ```

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod external;
pub mod provider;
pub mod scanner;
pub mod text;

pub use config::{DEFAULT_PARSER_TIMEOUT, ValidationConfig};
pub use diagnostic::{
    DiagnosticCode, NsqlDiagnostic, PARSER_SOURCE, Position, Range, SERVER_SOURCE, Severity,
};
pub use error::{MalformedOutput, ParserError, ParserResult};
pub use external::{ExternalParser, ParserErrorRecord};
pub use provider::{DiagnosticProvider, ValidationEngine};
pub use scanner::{HeuristicScanner, StatementState};
pub use text::SourceLines;
