// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock diagnostic provider for testing
//!
//! Returns a fixed diagnostic list and records every text it was asked to
//! validate.

use std::sync::Arc;
use std::time::Duration;

use nsql_lsp_validation::{DiagnosticProvider, NsqlDiagnostic, Range};
use tokio::sync::Mutex;

/// In-memory mock provider for testing
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    diagnostics: Vec<NsqlDiagnostic>,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a provider that reports nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic to every report
    pub fn add_diagnostic(mut self, diagnostic: NsqlDiagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    /// Add an error diagnostic on the given line
    pub fn add_error(self, line: u32, message: &str) -> Self {
        self.add_diagnostic(NsqlDiagnostic::error(message, Range::on_line(line, 0, 1)))
    }

    /// Wait this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Texts validated so far, in call order
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    /// Number of validation calls so far
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait::async_trait]
impl DiagnosticProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn diagnose(&self, text: &str) -> Vec<NsqlDiagnostic> {
        self.calls.lock().await.push(text.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.diagnostics.clone()
    }
}
