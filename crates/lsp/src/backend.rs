// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # LSP Backend Implementation
//!
//! This module provides the main LSP server backend using tower-lsp.
//!
//! ## Overview
//!
//! The backend handles:
//! - LSP protocol communication via tower-lsp
//! - Document lifecycle (open, change, close) with revalidation
//! - Keyword completion, completion resolve and hover
//! - Configuration from initialization options and configuration changes
//! - The `nsql.serverInfo` and `nsql.revalidate` commands
//!
//! ## Architecture
//!
//! ```text
//! Client → LSP Backend → DocumentSync → DocumentStore
//!                │             ↓
//!                │       ValidationEngine → publishDiagnostics
//!                ↓
//!        CompletionEngine / HoverEngine → Keyword catalogue
//! ```

use serde_json::{Value, json};
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{Error as RpcError, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{error, info, warn};

use crate::completion::CompletionEngine;
use crate::config::{ClientFlags, ConfigError, EngineConfig, SETTINGS_SECTION};
use crate::document::DocumentError;
use crate::hover::HoverEngine;
use crate::sync::DocumentSync;
use crate::{SERVER_DISPLAY_NAME, SERVER_NAME, VERSION};

/// Command returning server name, version, status and active validator
pub const SERVER_INFO_COMMAND: &str = "nsql.serverInfo";

/// Command re-running validation for every open document
pub const REVALIDATE_COMMAND: &str = "nsql.revalidate";

/// Registration id for configuration change notifications
const CONFIGURATION_REGISTRATION_ID: &str = "nsql-configuration";

/// LSP backend implementation
///
/// Main entry point for all LSP protocol operations.
/// Uses tower-lsp framework for protocol handling.
pub struct LspBackend {
    /// LSP client for sending notifications and requests
    client: Client,

    /// Document lifecycle and validation
    sync: DocumentSync,

    /// Capabilities announced by the client in `initialize`
    flags: RwLock<ClientFlags>,

    completion: CompletionEngine,
    hover: HoverEngine,
}

impl LspBackend {
    /// Create a new LSP backend
    pub fn new(client: Client) -> Self {
        Self::with_sync(client, DocumentSync::new(EngineConfig::default_runtime_fallback()))
    }

    /// Create a backend around an existing sync manager
    pub fn with_sync(client: Client, sync: DocumentSync) -> Self {
        Self {
            client,
            sync,
            flags: RwLock::new(ClientFlags::default()),
            completion: CompletionEngine::new(),
            hover: HoverEngine::new(),
        }
    }

    /// Get the document sync manager
    pub fn sync(&self) -> &DocumentSync {
        &self.sync
    }

    /// Log a message to the client
    async fn log_message(&self, message: &str, message_type: MessageType) {
        self.client.log_message(message_type, message).await;
    }

    /// Show a message to the user
    async fn show_message(&self, message: &str, message_type: MessageType) {
        self.client.show_message(message_type, message).await;
    }

    /// Apply a settings payload; revalidates all documents when it changes
    /// the configuration.
    async fn apply_settings(&self, settings: &Value) -> std::result::Result<bool, LspError> {
        let Some(config) = EngineConfig::from_lsp_settings(settings)? else {
            return Ok(false);
        };
        config.validate()?;

        if !self.sync.set_config(config).await {
            return Ok(false);
        }

        let validator = self.sync.validator_name().await;
        self.log_message(
            &format!("Using {} NSQL validator", validator),
            MessageType::INFO,
        )
        .await;

        let count = self.sync.revalidate_all(&self.client).await;
        info!("Revalidated {} documents after configuration change", count);
        Ok(true)
    }

    /// Pull the `nsql` section through `workspace/configuration`
    async fn pull_configuration(&self) {
        let items = vec![ConfigurationItem {
            scope_uri: None,
            section: Some(SETTINGS_SECTION.to_string()),
        }];

        match self.client.configuration(items).await {
            Ok(values) => {
                if let Some(section) = values.into_iter().next().filter(|v| !v.is_null()) {
                    let mut settings = serde_json::Map::new();
                    settings.insert(SETTINGS_SECTION.to_string(), section);
                    if let Err(e) = self.apply_settings(&Value::Object(settings)).await {
                        self.report_settings_error(&e).await;
                    }
                }
            }
            Err(e) => warn!("Failed to fetch workspace configuration: {}", e),
        }
    }

    async fn report_settings_error(&self, err: &LspError) {
        warn!("Ignoring NSQL settings: {}", err);
        self.show_message(&format!("Ignoring NSQL settings: {}", err), MessageType::WARNING)
            .await;
    }

    /// Server information reported by [`SERVER_INFO_COMMAND`]
    pub async fn server_info(&self) -> Value {
        json!({
            "name": SERVER_DISPLAY_NAME,
            "id": SERVER_NAME,
            "version": VERSION,
            "status": "Active",
            "validator": self.sync.validator_name().await,
        })
    }

    /// Run a workspace command
    pub async fn run_command(&self, command: &str) -> std::result::Result<Value, LspError> {
        match command {
            SERVER_INFO_COMMAND => {
                let report = self.server_info().await;
                self.show_message(
                    &format!(
                        "{}\nVersion: {}\nStatus: Active\nValidator: {}",
                        SERVER_DISPLAY_NAME,
                        VERSION,
                        self.sync.validator_name().await
                    ),
                    MessageType::INFO,
                )
                .await;
                Ok(report)
            }
            REVALIDATE_COMMAND => {
                let count = self.sync.revalidate_all(&self.client).await;
                self.log_message(
                    &format!("Revalidated {} NSQL documents", count),
                    MessageType::INFO,
                )
                .await;
                Ok(json!({ "revalidated": count }))
            }
            other => Err(LspError::UnknownCommand(other.to_string())),
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspBackend {
    /// Initialize the LSP server
    ///
    /// Records client capabilities, applies initialization options and
    /// returns server capabilities.
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Initializing NSQL language server");
        info!("Client info: {:?}", params.client_info);

        let flags = ClientFlags::from_capabilities(&params.capabilities);
        info!("Client flags: {:?}", flags);
        *self.flags.write().await = flags;

        if let Some(options) = &params.initialization_options
            && let Err(e) = self.apply_settings(options).await
        {
            self.report_settings_error(&e).await;
        }

        let workspace = flags.workspace_folders.then(|| WorkspaceServerCapabilities {
            workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                supported: Some(true),
                change_notifications: Some(OneOf::Left(true)),
            }),
            file_operations: None,
        });

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),

                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(true),
                    ..Default::default()
                }),

                hover_provider: Some(HoverProviderCapability::Simple(true)),

                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![
                        SERVER_INFO_COMMAND.to_string(),
                        REVALIDATE_COMMAND.to_string(),
                    ],
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),

                workspace,

                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(VERSION.to_string()),
            }),
        })
    }

    /// Initialized notification
    ///
    /// Registers for configuration changes and pulls the current settings
    /// when the client supports it.
    async fn initialized(&self, _params: InitializedParams) {
        let flags = *self.flags.read().await;

        if flags.dynamic_configuration {
            let registration = Registration {
                id: CONFIGURATION_REGISTRATION_ID.to_string(),
                method: "workspace/didChangeConfiguration".to_string(),
                register_options: None,
            };
            if let Err(e) = self.client.register_capability(vec![registration]).await {
                warn!("Failed to register for configuration changes: {}", e);
            }
        }

        if flags.configuration {
            self.pull_configuration().await;
        }

        let validator = self.sync.validator_name().await;
        self.log_message(
            &format!("NSQL language server ready, using {} validator", validator),
            MessageType::INFO,
        )
        .await;
        info!("NSQL language server initialized and ready to process requests");
    }

    /// Shutdown the LSP server
    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down NSQL language server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.sync.on_document_open(&self.client, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        match self.sync.on_document_change(&self.client, params).await {
            Ok(_) => {}
            Err(DocumentError::DocumentNotFound(uri)) => {
                warn!("Document not found for change: {}", uri);
            }
            Err(e) => {
                error!("Failed to update document: {}", e);
                self.show_message(
                    &format!("Failed to update document: {}", e),
                    MessageType::ERROR,
                )
                .await;
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.sync.on_document_close(&self.client, params).await;
    }

    /// Completion request
    ///
    /// Offers the whole keyword catalogue.
    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let position = params.text_document_position.position;
        info!(
            "Completion requested: uri={}, line={}, col={}",
            params.text_document_position.text_document.uri, position.line, position.character
        );

        Ok(Some(CompletionResponse::Array(self.completion.complete())))
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        Ok(self.completion.resolve(item))
    }

    /// Hover request
    ///
    /// Returns keyword or identifier markdown for the word under the cursor.
    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(document) = self.sync.documents().get_document(&uri).await else {
            warn!("Document not found for hover: {}", uri);
            return Ok(None);
        };

        Ok(self.hover.hover(&document, position))
    }

    /// Configuration change notification
    ///
    /// Applies pushed settings; clients using the pull model send an empty
    /// payload, in which case the settings are fetched.
    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        info!("Configuration changed: {:?}", params.settings);

        let pushed = params.settings.get(SETTINGS_SECTION).is_some();
        if pushed {
            if let Err(e) = self.apply_settings(&params.settings).await {
                self.report_settings_error(&e).await;
            }
        } else if self.flags.read().await.configuration {
            self.pull_configuration().await;
        }
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        info!("Watched files changed: {} events", params.changes.len());
        self.log_message("Received a file change event", MessageType::LOG)
            .await;
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        info!(
            "Workspace folders changed: added={}, removed={}",
            params.event.added.len(),
            params.event.removed.len()
        );
        self.log_message("Workspace folder change event received", MessageType::LOG)
            .await;
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        info!("Command requested: {}", params.command);

        match self.run_command(&params.command).await {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Command failed: {}", e);
                Err(RpcError::invalid_params(e.to_string()))
            }
        }
    }
}

/// LSP backend errors
///
/// Errors that can occur during LSP operations.
#[derive(Debug, thiserror::Error)]
pub enum LspError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document error
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Command not offered by this server
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
