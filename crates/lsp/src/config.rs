// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # LSP Engine Configuration
//!
//! This module provides configuration management for the LSP engine.
//!
//! ## Sources
//!
//! Settings are read, in order of precedence, from:
//! 1. `workspace/didChangeConfiguration` notifications
//! 2. `initializationOptions` of the `initialize` request
//! 3. The `NSQL_PARSER_PATH` environment variable (parser path only)
//!
//! ## Settings Shape
//!
//! ```json
//! {
//!   "nsql": {
//!     "parserPath": "/usr/local/bin/nsql-parser",
//!     "parserTimeoutMs": 5000
//!   }
//! }
//! ```

use std::path::PathBuf;
use std::time::Duration;

use nsql_lsp_validation::{DEFAULT_PARSER_TIMEOUT, ValidationConfig};
use serde::Deserialize;
use serde_json::Value;
use tower_lsp::lsp_types::ClientCapabilities;

/// Environment variable naming the external parser executable
pub const PARSER_PATH_ENV: &str = "NSQL_PARSER_PATH";

/// Settings section key
pub const SETTINGS_SECTION: &str = "nsql";

/// Raw `nsql` settings section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NsqlSettings {
    parser_path: Option<String>,
    parser_timeout_ms: Option<u64>,
}

/// Main engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Provider selection and parser limits
    pub validation: ValidationConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new(validation: ValidationConfig) -> Self {
        Self { validation }
    }

    /// Validate the configuration
    ///
    /// Checks that:
    /// - A configured parser path is not empty
    /// - The parser timeout is not zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.validation.parser_path
            && path.as_os_str().is_empty()
        {
            return Err(ConfigError::EmptyParserPath);
        }

        if self.validation.parser_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Parse engine config from an LSP client settings payload.
    ///
    /// Returns `Ok(None)` when the payload has no `nsql` section.
    pub fn from_lsp_settings(settings: &Value) -> Result<Option<Self>, ConfigError> {
        Self::from_lsp_settings_with_fallback(settings, env_parser_path())
    }

    fn from_lsp_settings_with_fallback(
        settings: &Value,
        fallback_path: Option<PathBuf>,
    ) -> Result<Option<Self>, ConfigError> {
        let Some(section) = settings.get(SETTINGS_SECTION) else {
            return Ok(None);
        };

        let settings: NsqlSettings =
            serde_json::from_value(section.clone()).map_err(ConfigError::InvalidSettings)?;

        let validation = ValidationConfig {
            parser_path: settings.parser_path.map(PathBuf::from).or(fallback_path),
            parser_timeout: settings
                .parser_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_PARSER_TIMEOUT),
        };

        Ok(Some(Self::new(validation)))
    }

    /// Default config used when client settings have not arrived yet.
    pub fn default_runtime_fallback() -> Self {
        Self::new(ValidationConfig {
            parser_path: env_parser_path(),
            ..Default::default()
        })
    }
}

fn env_parser_path() -> Option<PathBuf> {
    std::env::var_os(PARSER_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Capabilities of the connected client that change server behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientFlags {
    /// Client can answer `workspace/configuration`
    pub configuration: bool,
    /// Client handles workspace folders
    pub workspace_folders: bool,
    /// Client renders related information on diagnostics
    pub diagnostic_related_information: bool,
    /// Client accepts dynamic registration of configuration changes
    pub dynamic_configuration: bool,
}

impl ClientFlags {
    pub fn from_capabilities(capabilities: &ClientCapabilities) -> Self {
        let workspace = capabilities.workspace.as_ref();

        Self {
            configuration: workspace.and_then(|w| w.configuration).unwrap_or(false),
            workspace_folders: workspace.and_then(|w| w.workspace_folders).unwrap_or(false),
            diagnostic_related_information: capabilities
                .text_document
                .as_ref()
                .and_then(|t| t.publish_diagnostics.as_ref())
                .and_then(|p| p.related_information)
                .unwrap_or(false),
            dynamic_configuration: workspace
                .and_then(|w| w.did_change_configuration.as_ref())
                .and_then(|d| d.dynamic_registration)
                .unwrap_or(false),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Parser path given but empty
    #[error("Parser path must not be empty")]
    EmptyParserPath,

    /// Parser timeout of zero
    #[error("Parser timeout must be greater than zero")]
    ZeroTimeout,

    /// Settings section has the wrong shape
    #[error("Invalid nsql settings: {0}")]
    InvalidSettings(#[source] serde_json::Error),
}
