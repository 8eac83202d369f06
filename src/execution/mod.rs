// ABOUTME: Execution service abstraction for running editor code in a remote sandbox
// ABOUTME: Defines the runner contract, wire types, and terminal output classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Code Execution
//!
//! Sandboxed execution is delegated to a third-party runner. Each runner keeps
//! a fixed allowlist of languages mapped to its own runtime identifiers and
//! rejects anything else before touching the network.
//!
//! Results are classified for the terminal with a fixed precedence:
//! compile diagnostics, then runtime errors, then standard output, then
//! "no output".

mod judge0;
mod piston;

pub use judge0::Judge0Runner;
pub use piston::PistonRunner;

use std::sync::Arc;

use async_trait::async_trait;
use codemind_core::constants::messages;
use serde::{Deserialize, Serialize};

use crate::config::environment::{ExecutionConfig, RunnerKind};
use crate::errors::{AppError, AppResult};

/// Body of `POST /api/run-code`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Source text
    pub code: String,
    /// Language name; validated by the runner
    pub language: String,
    /// Standard input fed to the program
    #[serde(default)]
    pub stdin: String,
}

impl ExecutionRequest {
    /// Build a request with empty stdin
    #[must_use]
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            stdin: String::new(),
        }
    }

    /// Attach standard input
    #[must_use]
    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = stdin.into();
        self
    }
}

/// Captured output of one run, as returned by `POST /api/run-code`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Standard output
    #[serde(default)]
    pub stdout: String,
    /// Standard error, or the runner's own failure message
    #[serde(default)]
    pub stderr: String,
    /// Compiler diagnostics from a failed compile stage
    #[serde(default)]
    pub compile_output: String,
    /// Runner status message, if any
    #[serde(default)]
    pub message: String,
}

/// Display colouring for terminal text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Idle or in progress
    Neutral,
    /// Program ran
    Success,
    /// Rejected locally
    Warning,
    /// Compile, runtime, or transport failure
    Error,
}

/// Text shown in the editor's terminal pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalOutput {
    /// Rendered text
    pub text: String,
    /// Colouring
    pub tone: Tone,
}

impl TerminalOutput {
    /// Build an output
    #[must_use]
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    /// Empty terminal
    #[must_use]
    pub fn idle() -> Self {
        Self::new(String::new(), Tone::Neutral)
    }

    /// Shown while a run is outstanding
    #[must_use]
    pub fn running() -> Self {
        Self::new(messages::RUNNING, Tone::Neutral)
    }

    /// Shown when the execution service could not be reached
    #[must_use]
    pub fn connect_failed() -> Self {
        Self::new(messages::RUN_CONNECT_FAILED, Tone::Error)
    }

    /// Whether nothing is displayed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl ExecutionResult {
    /// Pick what the terminal shows
    #[must_use]
    pub fn classify(&self) -> TerminalOutput {
        if !self.compile_output.is_empty() {
            TerminalOutput::new(self.compile_output.clone(), Tone::Error)
        } else if !self.stderr.is_empty() {
            TerminalOutput::new(
                format!("{}\n{}", messages::RUNTIME_ERROR_PREFIX, self.stderr),
                Tone::Error,
            )
        } else if !self.stdout.is_empty() {
            TerminalOutput::new(self.stdout.clone(), Tone::Success)
        } else if !self.message.is_empty() {
            TerminalOutput::new(
                format!("{} {}", messages::SYSTEM_ERROR_PREFIX, self.message),
                Tone::Error,
            )
        } else {
            TerminalOutput::new(messages::NO_OUTPUT, Tone::Success)
        }
    }
}

/// A sandboxed code execution service
#[async_trait]
pub trait CodeRunner: Send + Sync {
    /// Service name for logs
    fn name(&self) -> &'static str;

    /// Whether `language` is in this runner's allowlist
    fn supports(&self, language: &str) -> bool;

    /// Run the code
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedLanguage` without any network call when the
    /// language is outside the allowlist, or an upstream error when the
    /// service fails
    async fn execute(&self, request: &ExecutionRequest) -> AppResult<ExecutionResult>;
}

/// Reject languages outside the runner's allowlist
///
/// # Errors
///
/// Returns `UnsupportedLanguage` naming the rejected language
pub fn ensure_supported(runner: &dyn CodeRunner, language: &str) -> AppResult<()> {
    if runner.supports(language) {
        Ok(())
    } else {
        Err(AppError::unsupported_language(language))
    }
}

/// Build the configured runner
///
/// # Errors
///
/// Returns a configuration error if Judge0 is selected without an API key
pub fn runner_from_config(config: &ExecutionConfig) -> AppResult<Arc<dyn CodeRunner>> {
    match config.runner {
        RunnerKind::Piston => Ok(Arc::new(PistonRunner::new(&config.piston_url))),
        RunnerKind::Judge0 => {
            let key = config
                .judge0_api_key
                .as_deref()
                .ok_or_else(|| AppError::config_missing("JUDGE0_API_KEY is missing"))?;
            Ok(Arc::new(Judge0Runner::new(&config.judge0_url, key)))
        }
    }
}
