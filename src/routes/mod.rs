// ABOUTME: Route module organization for the CodeMind HTTP API
// ABOUTME: Assembles the assistant, execution, history, and health routes into one router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the `CodeMind` server
//!
//! Each domain module holds its route definitions and thin handlers that
//! delegate to the services in [`ServerResources`].

/// Assistant (completion) route
pub mod ai_assistant;
/// Health check and readiness routes
pub mod health;
/// Interaction history routes
pub mod history;
/// Code execution route
pub mod run_code;

pub use ai_assistant::AssistantRoutes;
pub use health::HealthRoutes;
pub use history::HistoryRoutes;
pub use run_code::RunCodeRoutes;

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, Json, Router};

use crate::errors::{AppError, AppResult};
use crate::middleware::{http_trace_layer, setup_cors};
use crate::resources::ServerResources;

/// Unwrap a JSON body, turning extractor rejections into `{"error": ...}` 400s
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}

/// The complete application router with tracing and CORS layers
pub fn router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AssistantRoutes::routes(Arc::clone(&resources)))
        .merge(RunCodeRoutes::routes(Arc::clone(&resources)))
        .merge(HistoryRoutes::routes(resources))
        .layer(cors)
        .layer(http_trace_layer())
}
