// ABOUTME: Run command for the codemind CLI
// ABOUTME: Loads source into the editor surface and prints the classified terminal output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::PathBuf;
use std::sync::Arc;

use codemind::{
    client::ApiClient,
    errors::{AppError, AppResult},
    execution::Tone,
    ui::{AppContext, EditorSurface},
};

type Result<T> = AppResult<T>;
use tracing::info;

use crate::helpers::{display::display_terminal, source::read_source};

/// Run a file (or the language template) and print the terminal pane
pub async fn execute(
    ctx: &AppContext,
    client: ApiClient,
    language: &str,
    file: Option<PathBuf>,
    stdin: Option<String>,
) -> Result<()> {
    let mut editor = EditorSurface::new(Arc::new(client));
    editor.select_language(language);
    if let Some(path) = file {
        editor.set_code(read_source(&path).await?);
    }
    if let Some(stdin) = stdin {
        editor.set_stdin(stdin);
    }

    info!(language = editor.language(), "Running code");
    let output = editor.run().await;
    display_terminal(ctx, &output);

    match output.tone {
        Tone::Error | Tone::Warning => Err(AppError::invalid_input("Run did not succeed")),
        Tone::Success | Tone::Neutral => Ok(()),
    }
}
