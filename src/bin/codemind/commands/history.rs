// ABOUTME: History commands for the codemind CLI
// ABOUTME: Handles list, show, and delete through the history viewer component
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use codemind::{
    client::ApiClient,
    errors::{AppError, AppResult},
    ui::{AppContext, HistoryViewer},
};

type Result<T> = AppResult<T>;

use crate::helpers::display::{display_history_detail, display_history_list, display_notice};

async fn load_viewer(ctx: &AppContext, client: ApiClient) -> Result<HistoryViewer> {
    let mut viewer = HistoryViewer::new(Arc::new(client));
    if !viewer.load().await {
        if let Some(notice) = viewer.notice() {
            display_notice(ctx, notice);
        }
        return Err(AppError::external_service("history", "Failed to load history"));
    }
    Ok(viewer)
}

/// List every interaction, newest first
pub async fn list(ctx: &AppContext, client: ApiClient) -> Result<()> {
    let viewer = load_viewer(ctx, client).await?;
    display_history_list(ctx, viewer.entries());
    Ok(())
}

/// Show one interaction in full
pub async fn show(ctx: &AppContext, client: ApiClient, id: &str) -> Result<()> {
    let viewer = load_viewer(ctx, client).await?;
    let detail = viewer
        .select(id)
        .ok_or_else(|| AppError::not_found(format!("History entry {id}")))?;
    display_history_detail(&detail);
    Ok(())
}

/// Delete one interaction
pub async fn delete(ctx: &AppContext, client: ApiClient, id: &str) -> Result<()> {
    let mut viewer = HistoryViewer::new(Arc::new(client));
    let removed = viewer.remove(id).await;
    if let Some(notice) = viewer.notice() {
        display_notice(ctx, notice);
    }
    if removed {
        Ok(())
    } else {
        Err(AppError::external_service("history", "Failed to delete"))
    }
}
