// ABOUTME: Domain models re-exported from codemind-core
// ABOUTME: Languages, assistant modes, and interaction history records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! See [`codemind_core::models`] for the definitions.

pub use codemind_core::models::{
    truncate, AssistantMode, HistoryEntry, InteractionRecord, Language, NewInteraction,
    FALLBACK_LANGUAGE, PREVIEW_CHARS,
};
