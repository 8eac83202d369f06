// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Source file loading for the codemind CLI
// ABOUTME: Reads editor input from disk with errors mapped to AppError

use std::path::Path;

use codemind::errors::{AppError, AppResult};
use tracing::debug;

/// Read a source file into a string
pub async fn read_source(path: &Path) -> AppResult<String> {
    let code = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("Failed to read {}: {e}", path.display()))
    })?;
    debug!(path = %path.display(), bytes = code.len(), "Loaded source file");
    Ok(code)
}
