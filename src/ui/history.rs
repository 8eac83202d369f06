// ABOUTME: History viewer state: the loaded interaction list, notices, and the detail view
// ABOUTME: Deletion updates the list only after the store confirms it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use codemind_core::constants::messages;
use tracing::{debug, warn};

use crate::history::HistoryStore;
use crate::models::HistoryEntry;

use super::markdown::RenderedMarkdown;

/// Notice colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

/// A transient message shown above the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Headline
    pub title: String,
    /// Upstream detail, possibly empty
    pub detail: String,
    /// Colouring
    pub kind: NoticeKind,
}

impl Notice {
    fn error(title: &str, detail: impl Into<String>) -> Self {
        Self {
            title: title.to_owned(),
            detail: detail.into(),
            kind: NoticeKind::Error,
        }
    }

    fn success(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            detail: String::new(),
            kind: NoticeKind::Success,
        }
    }
}

/// Detail view of one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryDetail {
    /// The record
    pub entry: HistoryEntry,
    /// "Your Prompt" or "Source Code"
    pub primary_label: &'static str,
    /// Full prompt or code, by mode
    pub primary_input: String,
    /// Completion text as markdown blocks
    pub response: RenderedMarkdown,
}

/// Loaded history list
pub struct HistoryViewer {
    store: Arc<dyn HistoryStore>,
    entries: Vec<HistoryEntry>,
    notice: Option<Notice>,
    loaded: bool,
}

impl HistoryViewer {
    /// Empty viewer; call [`HistoryViewer::load`] on entry
    #[must_use]
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            entries: Vec::new(),
            notice: None,
            loaded: false,
        }
    }

    /// Fetch every record, newest first
    ///
    /// Returns whether the fetch succeeded. On failure the previous list is
    /// kept and a notice is set.
    pub async fn load(&mut self) -> bool {
        match self.store.list().await {
            Ok(records) => {
                self.entries = records.into_iter().map(HistoryEntry::from).collect();
                self.loaded = true;
                debug!(count = self.entries.len(), "History loaded");
                true
            }
            Err(e) => {
                warn!(backend = self.store.name(), error = %e, "History load failed");
                self.notice = Some(Notice::error(messages::HISTORY_LOAD_FAILED, e.message));
                false
            }
        }
    }

    /// Whether a load has succeeded
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Displayed records
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Current notice, if any
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Clear the notice
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Delete one record
    ///
    /// The list changes only after the store confirms the delete; a failure
    /// leaves it exactly as it was.
    pub async fn remove(&mut self, id: &str) -> bool {
        match self.store.delete(id).await {
            Ok(()) => {
                self.entries.retain(|entry| entry.id != id);
                self.notice = Some(Notice::success(messages::HISTORY_DELETED));
                true
            }
            Err(e) => {
                warn!(backend = self.store.name(), id, error = %e, "History delete failed");
                self.notice = Some(Notice::error(messages::HISTORY_DELETE_FAILED, e.message));
                false
            }
        }
    }

    /// Open the detail view for `id`
    #[must_use]
    pub fn select(&self, id: &str) -> Option<HistoryDetail> {
        let entry = self.entries.iter().find(|entry| entry.id == id)?.clone();
        Some(HistoryDetail {
            primary_label: entry.primary_label(),
            primary_input: entry.primary_input().to_owned(),
            response: RenderedMarkdown::parse(&entry.response),
            entry,
        })
    }
}
