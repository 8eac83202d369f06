// ABOUTME: Completion service seam used by the assistant panel and the ai-assistant route
// ABOUTME: Wire request type plus an in-process adapter over any LlmProvider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Completion Service
//!
//! The assistant only needs "mode + inputs in, text out". [`CompletionService`]
//! is that contract. [`LocalCompletion`] satisfies it in-process by building the
//! instruction and calling an [`LlmProvider`]; the HTTP client satisfies it by
//! posting to `/api/ai-assistant`.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::AppResult;
use crate::llm::{prompts, ChatMessage, ChatRequest, LlmProvider};
use crate::logging::AppLogger;
use crate::models::AssistantMode;

/// Body of `POST /api/ai-assistant`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    /// Which instruction template to use
    pub mode: AssistantMode,
    /// Language name as selected in the editor
    pub language: String,
    /// Current editor contents
    #[serde(default)]
    pub code: String,
    /// Free-text prompt for generate
    #[serde(default)]
    pub user_prompt: String,
}

impl CompletionRequest {
    /// Build a request
    #[must_use]
    pub fn new(
        mode: AssistantMode,
        language: impl Into<String>,
        code: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            language: language.into(),
            code: code.into(),
            user_prompt: user_prompt.into(),
        }
    }

    /// Instruction text sent as the user message
    #[must_use]
    pub fn instruction(&self) -> String {
        prompts::build_instruction(self.mode, &self.language, &self.code, &self.user_prompt)
    }
}

/// Success body of `POST /api/ai-assistant`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Completion text, usually markdown
    pub result: String,
}

/// Anything that turns an assistant request into completion text
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run one completion
    ///
    /// # Errors
    ///
    /// Returns an error if the completion service is unconfigured, unreachable,
    /// or replies with a failure
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String>;
}

/// In-process completion over an [`LlmProvider`]
#[derive(Clone)]
pub struct LocalCompletion {
    provider: Arc<dyn LlmProvider>,
}

impl LocalCompletion {
    /// Wrap a provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl CompletionService for LocalCompletion {
    #[instrument(skip(self, request), fields(mode = %request.mode, language = %request.language))]
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String> {
        let chat = ChatRequest::new(vec![
            ChatMessage::system(prompts::SYSTEM_PROMPT),
            ChatMessage::user(request.instruction()),
        ]);

        let started = Instant::now();
        let outcome = self.provider.complete(&chat).await;
        let elapsed = started.elapsed().as_millis() as u64;

        let model = outcome
            .as_ref()
            .map_or(self.provider.default_model(), |r| r.model.as_str());
        AppLogger::log_completion(
            request.mode.as_str(),
            &request.language,
            model,
            outcome.is_ok(),
            elapsed,
        );

        let response = outcome?;
        debug!(finish_reason = ?response.finish_reason, "completion finished");
        Ok(response.content)
    }
}
