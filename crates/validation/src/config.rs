// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Validation engine configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default time the external parser may run before it is killed
pub const DEFAULT_PARSER_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings that select and bound the diagnostic provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Path to the external parser executable, if any
    pub parser_path: Option<PathBuf>,

    /// Maximum run time of one parser invocation
    pub parser_timeout: Duration,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            parser_path: None,
            parser_timeout: DEFAULT_PARSER_TIMEOUT,
        }
    }
}

impl ValidationConfig {
    /// Configuration that always uses the built-in scanner
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Configuration that delegates to the parser at `path` when it exists
    pub fn with_parser(path: impl Into<PathBuf>) -> Self {
        Self {
            parser_path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Set the parser timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.parser_timeout = timeout;
        self
    }

    /// The configured parser path, but only when it names an existing file
    ///
    /// Checked on every call, so a parser installed after startup is picked
    /// up by the next validation pass.
    pub fn available_parser(&self) -> Option<&Path> {
        self.parser_path.as_deref().filter(|path| path.is_file())
    }
}
