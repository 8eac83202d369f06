// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Holds configuration plus the completion, execution, and history services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use codemind_core::constants::messages;
use tracing::{info, warn};

use crate::completion::{CompletionService, LocalCompletion};
use crate::config::environment::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::execution::{self, CodeRunner};
use crate::history::{self, HistoryStore};
use crate::llm::GroqProvider;

/// Services shared by all routes
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Completion service; absent when no API key is configured
    pub completion: Option<Arc<dyn CompletionService>>,
    /// Execution service
    pub runner: Arc<dyn CodeRunner>,
    /// History store
    pub history: Arc<dyn HistoryStore>,
}

impl ServerResources {
    /// Assemble resources from already-built services
    #[must_use]
    pub fn new(
        config: ServerConfig,
        completion: Option<Arc<dyn CompletionService>>,
        runner: Arc<dyn CodeRunner>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            completion,
            runner,
            history,
        }
    }

    /// Build every service the configuration selects
    ///
    /// # Errors
    ///
    /// Returns an error if the history store cannot be opened or the runner
    /// lacks its credentials
    pub async fn from_config(config: ServerConfig) -> AppResult<Self> {
        let completion = GroqProvider::from_config(&config.completion).map(|provider| {
            Arc::new(LocalCompletion::new(Arc::new(provider))) as Arc<dyn CompletionService>
        });
        if completion.is_none() {
            warn!("GROQ_API_KEY is not set; /api/ai-assistant will answer with a configuration error");
        }

        let runner = execution::runner_from_config(&config.execution)?;
        let history = history::connect(&config.history).await?;
        info!(
            runner = runner.name(),
            history = history.name(),
            "Server resources ready"
        );

        Ok(Self::new(config, completion, runner, history))
    }

    /// The completion service, or the fixed configuration error
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no completion key is configured
    pub fn completion(&self) -> AppResult<&dyn CompletionService> {
        self.completion
            .as_deref()
            .ok_or_else(|| AppError::config_missing(messages::COMPLETION_KEY_MISSING))
    }
}
