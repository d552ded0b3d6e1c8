// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Diagnostics Publishing
//!
//! Runs the validation engine over a document snapshot and publishes the
//! result to the client.
//!
//! ## Architecture
//!
//! ```text
//! Document → ValidationEngine → NsqlDiagnostic → LSP Diagnostic → Client
//! ```
//!
//! Every pass remembers the document version it read. If the document has
//! changed or closed by the time the pass finishes, its result is dropped;
//! the pass started by that change publishes instead. The version check and
//! the publish run under the store's publish lock, so an older pass can never
//! publish after a newer one.

use nsql_lsp_validation::{NsqlDiagnostic, Severity, ValidationEngine};
use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range, Url,
};
use tracing::{debug, info};

use crate::document::DocumentStore;

/// Destination for published diagnostics
///
/// Implemented for [`tower_lsp::Client`]; tests record into memory instead.
#[async_trait::async_trait]
pub trait DiagnosticSink: Send + Sync {
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>);
}

#[async_trait::async_trait]
impl DiagnosticSink for tower_lsp::Client {
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>) {
        self.publish_diagnostics(uri, diagnostics, version).await;
    }
}

/// Convert a severity to the protocol severity
pub fn severity_to_lsp(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Information => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    }
}

/// Convert to LSP diagnostic format
pub fn to_lsp(diagnostic: &NsqlDiagnostic) -> Diagnostic {
    let range = diagnostic.range;

    Diagnostic {
        range: Range::new(
            Position::new(range.start.line, range.start.character),
            Position::new(range.end.line, range.end.character),
        ),
        severity: Some(severity_to_lsp(diagnostic.severity)),
        code: diagnostic
            .code
            .as_ref()
            .map(|c| NumberOrString::String(c.as_str().to_string())),
        code_description: None,
        source: Some(diagnostic.source.to_string()),
        message: diagnostic.message.clone(),
        related_information: None,
        tags: None,
        data: None,
    }
}

/// Validate the current text of `uri` and publish the result
///
/// Returns the number of diagnostics published, or `None` when the document
/// is not open or the result went stale before it could be published.
pub async fn publish_diagnostics_for_document(
    engine: &ValidationEngine,
    documents: &DocumentStore,
    sink: &dyn DiagnosticSink,
    uri: &Url,
) -> Option<usize> {
    let document = documents.get_document(uri).await?;
    let version = document.version();

    let diagnostics: Vec<Diagnostic> = engine
        .validate(&document.get_content())
        .await
        .iter()
        .map(to_lsp)
        .collect();

    let _publishing = documents.lock_publish().await;

    if documents.current_version(uri).await != Some(version) {
        debug!("Dropping stale diagnostics for {} (version {})", uri, version);
        return None;
    }

    let count = diagnostics.len();
    if count > 0 {
        info!("Publishing {} diagnostics for {}", count, uri);
    }

    sink.publish(uri.clone(), diagnostics, Some(version)).await;

    Some(count)
}

/// Publish an empty diagnostic list for `uri`
///
/// Call after the document is removed from the store; passes still running
/// for it then drop their results.
pub async fn clear_diagnostics(documents: &DocumentStore, sink: &dyn DiagnosticSink, uri: &Url) {
    let _publishing = documents.lock_publish().await;
    sink.publish(uri.clone(), Vec::new(), None).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsql_lsp_validation::{DiagnosticCode, PARSER_SOURCE};

    #[test]
    fn test_to_lsp() {
        let diagnostic = NsqlDiagnostic::warning(
            "Statement should end with semicolon (;) or 'PLEASE'",
            nsql_lsp_validation::Range::on_line(3, 0, 12),
        )
        .with_code(DiagnosticCode::MissingTerminator);

        let lsp = to_lsp(&diagnostic);

        assert_eq!(lsp.severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(lsp.range, Range::new(Position::new(3, 0), Position::new(3, 12)));
        assert_eq!(lsp.code, Some(NumberOrString::String("NSQL-001".to_string())));
        assert_eq!(lsp.source.as_deref(), Some("nsql-server"));
        assert_eq!(lsp.message, diagnostic.message);
    }

    #[test]
    fn test_to_lsp_parser_source() {
        let diagnostic =
            NsqlDiagnostic::error("bad token", nsql_lsp_validation::Range::on_line(1, 4, 7))
                .with_source(PARSER_SOURCE);

        let lsp = to_lsp(&diagnostic);
        assert_eq!(lsp.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(lsp.source.as_deref(), Some("nsql-parser"));
        assert_eq!(lsp.code, None);
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(severity_to_lsp(Severity::Information), DiagnosticSeverity::INFORMATION);
        assert_eq!(severity_to_lsp(Severity::Hint), DiagnosticSeverity::HINT);
    }
}
