// ABOUTME: Configuration module for the CodeMind backend
// ABOUTME: Environment-only settings for the HTTP server and its three external services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment-variable driven server configuration
pub mod environment;

pub use environment::{
    CompletionConfig, Environment, ExecutionConfig, HistoryBackend, HistoryConfig, RunnerKind,
    ServerConfig,
};
