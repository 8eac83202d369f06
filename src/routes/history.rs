// ABOUTME: History route handlers for listing, recording, and deleting interactions
// ABOUTME: Lists newest first in display shape; deletes answer 204 or 404
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! History routes
//!
//! The assistant records an interaction through `POST /api/history` after it
//! has already shown the result, so a failure here never affects what the
//! user sees.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use tracing::info;

use super::json_body;
use crate::errors::AppError;
use crate::history::HistoryList;
use crate::models::NewInteraction;
use crate::resources::ServerResources;

/// History routes handler
pub struct HistoryRoutes;

impl HistoryRoutes {
    /// Create all history routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/history",
                get(Self::list_history).post(Self::create_entry),
            )
            .route("/api/history/:id", delete(Self::delete_entry))
            .with_state(resources)
    }

    /// List every interaction, newest first
    async fn list_history(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<HistoryList>, AppError> {
        let records = resources.history.list().await?;
        Ok(Json(HistoryList::from(records)))
    }

    /// Record one interaction
    async fn create_entry(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<NewInteraction>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let interaction = json_body(payload)?;
        let record = resources.history.insert(&interaction).await?;
        info!(id = %record.id, mode = %record.mode, "History entry recorded");
        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    /// Delete one interaction
    async fn delete_entry(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        resources.history.delete(&id).await?;
        info!(id = %id, "History entry deleted");
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
