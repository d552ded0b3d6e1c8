// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Diagnostic providers and the validation engine
//!
//! A [`DiagnosticProvider`] turns full document text into diagnostics. The
//! [`ValidationEngine`] picks one per validation pass from its
//! [`ValidationConfig`]: the external parser when its executable exists,
//! otherwise the built-in scanner.

use std::sync::Arc;

use tracing::debug;

use crate::config::ValidationConfig;
use crate::diagnostic::NsqlDiagnostic;
use crate::external::ExternalParser;
use crate::scanner::HeuristicScanner;

/// Source of diagnostics for a document
///
/// Implementations never fail: problems running the provider are reported
/// as diagnostics.
///
/// # Examples
///
/// ```rust
/// use nsql_lsp_validation::{DiagnosticProvider, HeuristicScanner};
///
/// # tokio_test::block_on(async {
/// let scanner = HeuristicScanner::new();
/// let diagnostics = scanner.diagnose("ASK something;").await;
/// assert!(diagnostics.is_empty());
/// # });
/// ```
#[async_trait::async_trait]
pub trait DiagnosticProvider: Send + Sync {
    /// Short human-readable name, used in logs and server info
    fn name(&self) -> &'static str;

    /// Produce the ordered diagnostics for the full document text
    async fn diagnose(&self, text: &str) -> Vec<NsqlDiagnostic>;
}

/// Validation engine
///
/// Owns the configuration and selects the provider for each pass.
#[derive(Clone)]
pub struct ValidationEngine {
    config: ValidationConfig,
    provider: Option<Arc<dyn DiagnosticProvider>>,
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("config", &self.config)
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .finish()
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::from_config(ValidationConfig::default())
    }
}

impl ValidationEngine {
    /// Engine that selects its provider from `config` on every pass
    pub fn from_config(config: ValidationConfig) -> Self {
        Self {
            config,
            provider: None,
        }
    }

    /// Engine that always uses `provider`
    pub fn with_provider(provider: Arc<dyn DiagnosticProvider>) -> Self {
        Self {
            config: ValidationConfig::default(),
            provider: Some(provider),
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Provider the next pass will use
    pub fn active_provider(&self) -> Arc<dyn DiagnosticProvider> {
        if let Some(provider) = &self.provider {
            return Arc::clone(provider);
        }

        match self.config.available_parser() {
            Some(path) => Arc::new(ExternalParser::new(path, self.config.parser_timeout)),
            None => Arc::new(HeuristicScanner::new()),
        }
    }

    /// Name of the provider the next pass will use
    pub fn validator_name(&self) -> &'static str {
        self.active_provider().name()
    }

    /// Validate the full document text
    pub async fn validate(&self, text: &str) -> Vec<NsqlDiagnostic> {
        let provider = self.active_provider();
        debug!("Using {} NSQL validator", provider.name());

        let diagnostics = provider.diagnose(text).await;
        debug!("Validation produced {} diagnostics", diagnostics.len());
        diagnostics
    }
}
