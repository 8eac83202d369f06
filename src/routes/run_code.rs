// ABOUTME: Code execution route forwarding editor code to the configured runner
// ABOUTME: Rejects unsupported languages with 400 before any upstream call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use super::json_body;
use crate::errors::AppError;
use crate::execution::{ExecutionRequest, ExecutionResult};
use crate::resources::ServerResources;

/// Execution routes handler
pub struct RunCodeRoutes;

impl RunCodeRoutes {
    /// Create the execution route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/run-code", post(Self::run_code))
            .with_state(resources)
    }

    async fn run_code(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<ExecutionRequest>, JsonRejection>,
    ) -> Result<Json<ExecutionResult>, AppError> {
        let request = json_body(payload)?;
        let result = resources.runner.execute(&request).await?;
        Ok(Json(result))
    }
}
