// ABOUTME: Assistant route forwarding debug, explain, and generate requests to the completion service
// ABOUTME: Returns the completion text without persisting it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::info;

use super::json_body;
use crate::completion::{CompletionRequest, CompletionResponse};
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Assistant routes handler
pub struct AssistantRoutes;

impl AssistantRoutes {
    /// Create the assistant route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/ai-assistant", post(Self::assist))
            .with_state(resources)
    }

    /// Run one assistant action
    ///
    /// Persistence is the caller's job; this route only produces the text.
    async fn assist(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<CompletionRequest>, JsonRejection>,
    ) -> Result<Json<CompletionResponse>, AppError> {
        let request = json_body(payload)?;
        let completion = resources.completion()?;

        info!(mode = %request.mode, language = %request.language, "Assistant request");
        let result = completion.complete(&request).await?;

        Ok(Json(CompletionResponse { result }))
    }
}
