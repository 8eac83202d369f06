// ABOUTME: Core types and constants for the CodeMind editor backend
// ABOUTME: Foundation crate with error handling, interaction models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `CodeMind` Core
//!
//! Foundation crate providing shared types and constants for the `CodeMind`
//! editor backend and its clients. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Languages, assistant modes, and interaction history records
//! - **constants**: Service names, fixed user-facing messages, layout bounds

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (languages, modes, interaction records)
pub mod models;
