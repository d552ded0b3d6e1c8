// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for the external parser
//!
//! None of these reach the editor as errors: the engine turns them into a
//! single synthetic diagnostic.

use std::process::ExitStatus;

use thiserror::Error;

/// Result type alias for external parser operations
pub type ParserResult<T> = Result<T, ParserError>;

/// Errors that can occur while running the external parser
#[derive(Debug, Error)]
pub enum ParserError {
    /// The temporary input file could not be created or written
    #[error("failed to write temporary file: {0}")]
    TempFile(#[source] std::io::Error),

    /// The parser executable could not be started
    #[error("failed to start parser: {0}")]
    Spawn(#[source] std::io::Error),

    /// Waiting for the parser or reading its output failed
    #[error("I/O error while running parser: {0}")]
    Io(#[source] std::io::Error),

    /// The parser did not finish in time and was killed
    #[error("parser timed out after {0} ms")]
    Timeout(u128),

    /// The parser exited unsuccessfully
    #[error("parser exited with {status}: {stderr}")]
    ExitStatus { status: ExitStatus, stderr: String },
}

/// Stdout of the parser was not a JSON array of error records
#[derive(Debug, Error)]
#[error("{source}")]
pub struct MalformedOutput {
    /// Raw stdout, kept for logging
    pub raw: String,
    #[source]
    pub source: serde_json::Error,
}
