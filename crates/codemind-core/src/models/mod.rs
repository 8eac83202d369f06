// ABOUTME: Shared domain models for the CodeMind editor and assistant
// ABOUTME: Re-exports languages, assistant modes, and interaction history records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `Language`: the editor's selectable languages with starter templates
//! - `AssistantMode`: debug / explain / generate
//! - `NewInteraction`, `InteractionRecord`, `HistoryEntry`: one assistant
//!   exchange as written, as stored, and as displayed

mod interaction;
mod language;

pub use interaction::{
    truncate, HistoryEntry, InteractionRecord, NewInteraction, FALLBACK_LANGUAGE, PREVIEW_CHARS,
};
pub use language::{AssistantMode, Language};
