// ABOUTME: Ask command for the codemind CLI
// ABOUTME: Sends a debug, explain, or generate action and waits for the history write before exiting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::PathBuf;
use std::sync::Arc;

use codemind::{
    client::ApiClient,
    errors::{AppError, AppResult},
    models::{AssistantMode, Language},
    ui::{AppContext, AssistantDisplay, AssistantPanel},
};

type Result<T> = AppResult<T>;
use tracing::{debug, info, warn};

use crate::helpers::{display::display_assistant, source::read_source};

/// Ask the assistant and print its reply
pub async fn execute(
    ctx: &AppContext,
    client: ApiClient,
    mode: AssistantMode,
    language: &str,
    file: Option<PathBuf>,
    prompt: Option<String>,
) -> Result<()> {
    let code = match file {
        Some(path) => read_source(&path).await?,
        None if mode.uses_prompt() => String::new(),
        None => language
            .parse::<Language>()
            .map(|l| l.template().to_owned())
            .unwrap_or_default(),
    };
    let prompt = prompt.unwrap_or_default();
    if mode.uses_prompt() && prompt.trim().is_empty() {
        return Err(AppError::missing_field("prompt"));
    }

    let client = Arc::new(client);
    let panel = AssistantPanel::new(client.clone(), client);

    info!(mode = %mode, language, "Asking assistant");
    let outcome = panel.act(mode, language, &code, &prompt).await;
    display_assistant(ctx, &outcome.display);

    // The process exits right after this command, so the write is awaited here.
    match outcome.persistence.wait().await {
        Some(Ok(record)) => debug!(id = %record.id, "Saved to history"),
        Some(Err(e)) => warn!("History not saved: {}", e),
        None => {}
    }

    match outcome.display {
        AssistantDisplay::Failure { .. } => Err(AppError::external_service(
            "assistant",
            "Assistant request failed",
        )),
        _ => Ok(()),
    }
}
