// ABOUTME: Interaction record types for the assistant history log
// ABOUTME: Stored row shape, insert payload, and the mode-driven display mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AssistantMode;

/// Characters of primary input shown in a history list card
pub const PREVIEW_CHARS: usize = 120;

/// Language shown when a stored record carries none
pub const FALLBACK_LANGUAGE: &str = "text";

/// Payload written once per successful assistant action
///
/// `input` is the source code for debug/explain and the free-text prompt for
/// generate; the other field is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInteraction {
    /// Action that produced the output
    pub mode: AssistantMode,
    /// Language selected when the action ran
    pub language: String,
    /// Code or prompt, depending on `mode`
    pub input: String,
    /// Completion text shown to the user
    pub output: String,
}

impl NewInteraction {
    /// Build from the assistant's inputs, keeping only the field `mode` uses
    #[must_use]
    pub fn from_action(
        mode: AssistantMode,
        language: impl Into<String>,
        code: &str,
        prompt: &str,
        output: impl Into<String>,
    ) -> Self {
        let input = if mode.uses_prompt() { prompt } else { code };
        Self {
            mode,
            language: language.into(),
            input: input.to_owned(),
            output: output.into(),
        }
    }
}

/// A persisted interaction as the history table stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Opaque identifier assigned by the store
    pub id: String,
    /// Action that produced the output
    pub mode: AssistantMode,
    /// Language selected when the action ran
    #[serde(default)]
    pub language: Option<String>,
    /// Code or prompt, depending on `mode`
    pub prompt: String,
    /// Completion text
    pub code_output: String,
    /// When the store accepted the row
    pub created_at: DateTime<Utc>,
}

/// Display shape of a history record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Record identifier
    pub id: String,
    /// Action that produced the output
    pub mode: AssistantMode,
    /// Language label
    pub language: String,
    /// Source code; empty for generate records
    pub code: String,
    /// Free-text prompt; only present for generate records
    pub user_prompt: Option<String>,
    /// Completion text
    pub response: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<InteractionRecord> for HistoryEntry {
    fn from(record: InteractionRecord) -> Self {
        let (code, user_prompt) = if record.mode.uses_prompt() {
            (String::new(), Some(record.prompt))
        } else {
            (record.prompt, None)
        };

        Self {
            id: record.id,
            mode: record.mode,
            language: record
                .language
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| FALLBACK_LANGUAGE.to_owned()),
            code,
            user_prompt,
            response: record.code_output,
            created_at: record.created_at,
        }
    }
}

impl From<HistoryEntry> for InteractionRecord {
    fn from(entry: HistoryEntry) -> Self {
        let prompt = if entry.mode.uses_prompt() {
            entry.user_prompt.unwrap_or_default()
        } else {
            entry.code
        };

        Self {
            id: entry.id,
            mode: entry.mode,
            language: Some(entry.language),
            prompt,
            code_output: entry.response,
            created_at: entry.created_at,
        }
    }
}

impl HistoryEntry {
    /// The text the list and detail views lead with
    #[must_use]
    pub fn primary_input(&self) -> &str {
        if self.mode.uses_prompt() {
            self.user_prompt.as_deref().unwrap_or_default()
        } else {
            &self.code
        }
    }

    /// Heading for the primary input section
    #[must_use]
    pub const fn primary_label(&self) -> &'static str {
        if self.mode.uses_prompt() {
            "Your Prompt"
        } else {
            "Source Code"
        }
    }

    /// Primary input truncated for list cards
    #[must_use]
    pub fn preview(&self) -> String {
        truncate(self.primary_input(), PREVIEW_CHARS)
    }

    /// Card timestamp, e.g. `Mar 4, 2025 • 9:05 PM`
    #[must_use]
    pub fn display_timestamp(&self) -> String {
        self.created_at.format("%b %-d, %Y • %-I:%M %p").to_string()
    }
}

/// Truncate to `max` characters, appending `...` when anything was cut
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut cut: String = text.chars().take(max).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_owned()
    }
}
