// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory history, scripted service fakes, and resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `codemind`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use codemind::{
    completion::{CompletionRequest, CompletionService},
    config::environment::ServerConfig,
    errors::{AppError, AppResult},
    execution::{CodeRunner, ExecutionRequest, ExecutionResult},
    history::{HistoryStore, SqliteHistoryStore},
    models::{InteractionRecord, Language, NewInteraction},
    resources::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration with no external credentials and an in-memory database
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_owned()),
        "HTTP_PORT" => Some("0".to_owned()),
        _ => None,
    })
    .expect("test configuration")
}

/// Fresh in-memory history store
pub async fn create_test_history() -> Result<Arc<SqliteHistoryStore>> {
    Ok(Arc::new(SqliteHistoryStore::connect("sqlite::memory:").await?))
}

/// Resources wired to the given fakes
pub fn create_test_resources(
    completion: Option<Arc<dyn CompletionService>>,
    runner: Arc<dyn CodeRunner>,
    history: Arc<dyn HistoryStore>,
) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(test_config(), completion, runner, history))
}

/// Resources with a scripted completion, an echo runner, and in-memory history
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    init_test_logging();
    Ok(create_test_resources(
        Some(Arc::new(ScriptedCompletion::replying(["```js\nok\n```"]))),
        Arc::new(EchoRunner::default()),
        create_test_history().await?,
    ))
}

// ============================================================================
// Completion fakes
// ============================================================================

/// One scripted completion reply
pub enum Reply {
    Text(String),
    Fail(AppError),
    /// Text delivered after a delay, for out-of-order resolution
    Delayed(String, Duration),
}

/// Completion service answering from a queue and recording requests
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying<const N: usize>(texts: [&str; N]) -> Self {
        Self::new(texts.map(|t| Reply::Text(t.to_owned())))
    }

    pub fn failing(error: AppError) -> Self {
        Self::new([Reply::Fail(error)])
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::Text("default reply".to_owned()));
        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Fail(error) => Err(error),
            Reply::Delayed(text, delay) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
        }
    }
}

// ============================================================================
// Runner fakes
// ============================================================================

/// Runner supporting the editor languages; prints the code back as stdout
#[derive(Default)]
pub struct EchoRunner {
    calls: AtomicUsize,
}

impl EchoRunner {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CodeRunner for EchoRunner {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn supports(&self, language: &str) -> bool {
        Language::ALL.iter().any(|l| l.as_str() == language)
    }

    async fn execute(&self, request: &ExecutionRequest) -> AppResult<ExecutionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        codemind::execution::ensure_supported(self, &request.language)?;
        Ok(ExecutionResult {
            stdout: request.code.clone(),
            ..ExecutionResult::default()
        })
    }
}

/// Runner whose every call fails at the transport level
#[derive(Default)]
pub struct OfflineRunner;

#[async_trait]
impl CodeRunner for OfflineRunner {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn supports(&self, _language: &str) -> bool {
        true
    }

    async fn execute(&self, _request: &ExecutionRequest) -> AppResult<ExecutionResult> {
        Err(AppError::external_unavailable("offline", "connection refused"))
    }
}

// ============================================================================
// History fakes
// ============================================================================

/// Store wrapper whose writes and deletes can be forced to fail
pub struct FlakyHistory {
    inner: Arc<SqliteHistoryStore>,
    pub fail_insert: bool,
    pub fail_delete: bool,
    pub fail_list: bool,
}

impl FlakyHistory {
    pub fn new(inner: Arc<SqliteHistoryStore>) -> Self {
        Self {
            inner,
            fail_insert: false,
            fail_delete: false,
            fail_list: false,
        }
    }
}

#[async_trait]
impl HistoryStore for FlakyHistory {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn insert(&self, interaction: &NewInteraction) -> AppResult<InteractionRecord> {
        if self.fail_insert {
            return Err(AppError::database("disk I/O error"));
        }
        self.inner.insert(interaction).await
    }

    async fn list(&self) -> AppResult<Vec<InteractionRecord>> {
        if self.fail_list {
            return Err(AppError::external_unavailable("flaky", "connection reset"));
        }
        self.inner.list().await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        if self.fail_delete {
            return Err(AppError::database("database is locked"));
        }
        self.inner.delete(id).await
    }
}

/// Insert a record and return it
pub async fn seed_interaction(
    store: &dyn HistoryStore,
    interaction: NewInteraction,
) -> InteractionRecord {
    store.insert(&interaction).await.unwrap()
}
