// ABOUTME: Error types re-exported from codemind-core for use throughout the crate
// ABOUTME: Keeps crate::errors paths stable for routes, clients, and components
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The error taxonomy lives in `codemind-core` so the client library and the
//! server share one wire shape. See [`codemind_core::errors`].

pub use codemind_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
