// ABOUTME: Main library entry point for the CodeMind editor backend
// ABOUTME: AI assistant, sandboxed code runner, interaction history, and UI component state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `CodeMind`
//!
//! Backend and component state for a code editor paired with an AI assistant.
//! A user writes code, asks a chat-completion model to debug, explain, or
//! generate code, runs the code in a remote sandbox, and reviews past
//! assistant interactions from a persisted history.
//!
//! ## Architecture
//!
//! - **Services**: `llm` + `completion` (chat model), `execution` (sandboxed
//!   runners), `history` (interaction store). Each sits behind a trait.
//! - **Server**: `routes`, `middleware`, `resources`, `server` expose the
//!   services over HTTP.
//! - **Client**: `client` implements the same traits over the HTTP API.
//! - **UI**: `ui` holds the editor, assistant, history, and layout
//!   components, generic over the service traits.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use codemind::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("CodeMind configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// HTTP client for the `CodeMind` API
pub mod client;

/// Completion service seam and the in-process adapter
pub mod completion;

/// Configuration management
pub mod config;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Sandboxed code execution runners
pub mod execution;

/// Persisted assistant interaction history
pub mod history;

/// LLM provider abstraction for chat completions
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for request tracing and CORS
pub mod middleware;

/// Shared domain types
pub mod models;

/// Shared server resources
pub mod resources;

/// `HTTP` routes
pub mod routes;

/// Server lifecycle
pub mod server;

/// Component state for the editor shell
pub mod ui;
