// ABOUTME: Component state for the editor shell, independent of any rendering toolkit
// ABOUTME: Layout, editor, assistant, and history components plus the shared context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # UI Components
//!
//! Each component owns its own state and talks to the outside world only
//! through the service traits ([`crate::completion::CompletionService`],
//! [`crate::execution::CodeRunner`], [`crate::history::HistoryStore`]). The
//! same component works against the HTTP client or in-process providers.
//!
//! Cross-cutting state lives in one [`AppContext`] passed down by the shell.

pub mod assistant;
pub mod context;
pub mod editor;
pub mod history;
pub mod layout;
pub mod markdown;

pub use assistant::{ActOutcome, AssistantDisplay, AssistantPanel, PersistenceHandle};
pub use context::{AppContext, Theme};
pub use editor::EditorSurface;
pub use history::{HistoryDetail, HistoryViewer, Notice, NoticeKind};
pub use layout::{DragSession, SplitLayout};
pub use markdown::{Block, CodeBlock, ListItem, RenderedMarkdown};
