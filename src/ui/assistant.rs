// ABOUTME: Assistant panel orchestration: request a completion, display it, persist it
// ABOUTME: Display and persistence are independent channels; persistence never touches the display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Assistant Panel
//!
//! [`AssistantPanel::act`] sends one debug, explain, or generate request.
//! The result is published to the response binding first. Only then is a
//! history write spawned as a separate task, whose outcome is logged and
//! otherwise ignored.
//!
//! Overlapping actions are allowed. The response binding shows whichever
//! completion resolved last, which may not be the one issued last.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use codemind_core::constants::messages;

use crate::completion::{CompletionRequest, CompletionService};
use crate::errors::{AppError, AppResult};
use crate::history::HistoryStore;
use crate::models::{AssistantMode, InteractionRecord, NewInteraction};

/// What the response area shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssistantDisplay {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is outstanding
    Loading,
    /// Completion text
    Result(String),
    /// Fixed failure message plus the upstream detail
    Failure {
        /// User-facing message
        message: String,
        /// Text carried by the failure
        detail: String,
    },
}

impl AssistantDisplay {
    /// Plain text for the response area
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Idle | Self::Loading => String::new(),
            Self::Result(text) => text.clone(),
            Self::Failure { message, detail } if detail.is_empty() => message.clone(),
            Self::Failure { message, detail } => format!("{message}\n{detail}"),
        }
    }

    /// Whether a request is outstanding
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// The spawned history write for one action
///
/// Empty when nothing was worth persisting (a failed or empty completion).
#[derive(Debug)]
pub struct PersistenceHandle(Option<JoinHandle<AppResult<InteractionRecord>>>);

impl PersistenceHandle {
    const fn none() -> Self {
        Self(None)
    }

    /// Whether a write was spawned
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        self.0.is_some()
    }

    /// Wait for the write; `None` if no write was spawned
    pub async fn wait(self) -> Option<AppResult<InteractionRecord>> {
        let handle = self.0?;
        Some(match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(AppError::internal(format!("History write task failed: {e}"))),
        })
    }
}

/// Result of [`AssistantPanel::act`]
#[derive(Debug)]
pub struct ActOutcome {
    /// Value published to the response binding
    pub display: AssistantDisplay,
    /// Independent history write
    pub persistence: PersistenceHandle,
}

/// Completion request, response display, and history write
pub struct AssistantPanel {
    completion: Arc<dyn CompletionService>,
    history: Arc<dyn HistoryStore>,
    response: watch::Sender<AssistantDisplay>,
}

impl AssistantPanel {
    /// Panel over the given services
    #[must_use]
    pub fn new(completion: Arc<dyn CompletionService>, history: Arc<dyn HistoryStore>) -> Self {
        let (response, _) = watch::channel(AssistantDisplay::Idle);
        Self {
            completion,
            history,
            response,
        }
    }

    /// Response display binding
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AssistantDisplay> {
        self.response.subscribe()
    }

    /// What the response area shows now
    #[must_use]
    pub fn response(&self) -> AssistantDisplay {
        self.response.borrow().clone()
    }

    /// Run one assistant action
    ///
    /// `prompt` is only sent for generate; debug and explain send the code.
    /// Must be called inside a tokio runtime since the history write is
    /// spawned onto it.
    pub async fn act(
        &self,
        mode: AssistantMode,
        language: &str,
        code: &str,
        prompt: &str,
    ) -> ActOutcome {
        self.response.send_replace(AssistantDisplay::Loading);

        let user_prompt = if mode.uses_prompt() { prompt } else { "" };
        let request = CompletionRequest::new(mode, language, code, user_prompt);

        let (display, output) = match self.completion.complete(&request).await {
            Ok(text) if text.trim().is_empty() => (
                AssistantDisplay::Result(messages::AI_NO_RESPONSE.to_owned()),
                None,
            ),
            Ok(text) => (AssistantDisplay::Result(text.clone()), Some(text)),
            Err(e) => {
                warn!(mode = %mode, error = %e.message, "Assistant request failed");
                let display = AssistantDisplay::Failure {
                    message: messages::AI_CONNECT_FAILED.to_owned(),
                    detail: e.message,
                };
                (display, None)
            }
        };
        self.response.send_replace(display.clone());

        let persistence = output.map_or_else(PersistenceHandle::none, |text| {
            self.persist(NewInteraction::from_action(
                mode, language, code, prompt, text,
            ))
        });

        ActOutcome {
            display,
            persistence,
        }
    }

    fn persist(&self, interaction: NewInteraction) -> PersistenceHandle {
        let store = Arc::clone(&self.history);
        debug!(backend = store.name(), "Scheduling history write");

        PersistenceHandle(Some(tokio::spawn(async move {
            let outcome = store.insert(&interaction).await;
            match &outcome {
                Ok(record) => info!(id = %record.id, mode = %record.mode, "Interaction saved"),
                Err(e) => warn!(backend = store.name(), error = %e, "Failed to save interaction"),
            }
            outcome
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        assert_eq!(AssistantDisplay::Loading.text(), "");
        let failure = AssistantDisplay::Failure {
            message: messages::AI_CONNECT_FAILED.to_owned(),
            detail: "quota exceeded".to_owned(),
        };
        assert_eq!(failure.text(), "Error connecting to AI.\nquota exceeded");
        assert!(AssistantDisplay::Loading.is_loading());
    }
}
