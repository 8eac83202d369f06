// ABOUTME: Typed HTTP client for the CodeMind server API
// ABOUTME: Implements the completion, execution, and history seams over reqwest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # API Client
//!
//! [`ApiClient`] lets the UI components run against a remote server. It
//! implements the same traits as the in-process providers, so an
//! `AssistantPanel` or `EditorSurface` does not know which one it holds.

use async_trait::async_trait;
use codemind_core::constants::service_names;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::completion::{CompletionRequest, CompletionResponse, CompletionService};
use crate::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
use crate::execution::{CodeRunner, ExecutionRequest, ExecutionResult};
use crate::history::{HistoryList, HistoryStore};
use crate::models::{InteractionRecord, Language, NewInteraction};

/// Default server address used by the CLI
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8081";

/// HTTP client for the `CodeMind` server
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url`
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Client for `CODEMIND_API_URL`, falling back to the local default
    #[must_use]
    pub fn from_env() -> Self {
        let url = std::env::var("CODEMIND_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        Self::new(&url)
    }

    /// Server address
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// History entry URL with `id` encoded as a single path segment
    fn history_entry_url(&self, id: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.url("/api/history"))
            .map_err(|e| AppError::config(format!("Invalid API URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| AppError::config(format!("API URL has no path: {}", self.base_url)))?
            .push(id);
        Ok(url)
    }

    fn transport_error(error: &reqwest::Error) -> AppError {
        AppError::external_unavailable(service_names::CODEMIND_API, error.to_string())
    }

    /// Rebuild the server's `AppError` from an error body
    async fn error_from(response: Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(parsed) => {
                let code = parsed.code.unwrap_or_else(|| code_for_status(status));
                AppError::new(code, parsed.error)
            }
            Err(_) => AppError::new(
                code_for_status(status),
                format!("{} ({status})", body.chars().take(200).collect::<String>()),
            ),
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        response.json::<T>().await.map_err(|e| {
            AppError::external_service(
                service_names::CODEMIND_API,
                format!("Failed to parse response: {e}"),
            )
        })
    }
}

fn code_for_status(status: StatusCode) -> ErrorCode {
    match status.as_u16() {
        400 => ErrorCode::InvalidInput,
        404 => ErrorCode::ResourceNotFound,
        500 => ErrorCode::InternalError,
        503 => ErrorCode::ExternalServiceUnavailable,
        _ => ErrorCode::ExternalServiceError,
    }
}

#[async_trait]
impl CompletionService for ApiClient {
    #[instrument(skip(self, request), fields(mode = %request.mode))]
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String> {
        debug!("Posting assistant request");
        let response = self
            .client
            .post(self.url("/api/ai-assistant"))
            .json(request)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;

        let body: CompletionResponse = Self::decode(response).await?;
        Ok(body.result)
    }
}

#[async_trait]
impl CodeRunner for ApiClient {
    fn name(&self) -> &'static str {
        service_names::CODEMIND_API
    }

    fn supports(&self, language: &str) -> bool {
        Language::ALL.iter().any(|l| l.as_str() == language)
    }

    #[instrument(skip(self, request), fields(language = %request.language))]
    async fn execute(&self, request: &ExecutionRequest) -> AppResult<ExecutionResult> {
        crate::execution::ensure_supported(self, &request.language)?;

        let response = self
            .client
            .post(self.url("/api/run-code"))
            .json(request)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;

        Self::decode(response).await
    }
}

#[async_trait]
impl HistoryStore for ApiClient {
    fn name(&self) -> &'static str {
        service_names::CODEMIND_API
    }

    async fn insert(&self, interaction: &NewInteraction) -> AppResult<InteractionRecord> {
        let response = self
            .client
            .post(self.url("/api/history"))
            .json(interaction)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;

        Self::decode(response).await
    }

    async fn list(&self) -> AppResult<Vec<InteractionRecord>> {
        let response = self
            .client
            .get(self.url("/api/history"))
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;

        let list: HistoryList = Self::decode(response).await?;
        Ok(list
            .entries
            .into_iter()
            .map(InteractionRecord::from)
            .collect())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let response = self
            .client
            .delete(self.history_entry_url(id)?)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_url_encodes_id() {
        let client = ApiClient::new("http://localhost:8081/");
        assert_eq!(
            client.history_entry_url("a/b?c").unwrap().as_str(),
            "http://localhost:8081/api/history/a%2Fb%3Fc"
        );
        assert_eq!(
            client.history_entry_url("7f3c").unwrap().as_str(),
            "http://localhost:8081/api/history/7f3c"
        );
    }

    #[test]
    fn test_allowlist_is_exact() {
        let client = ApiClient::new("http://localhost:8081/");
        assert_eq!(client.base_url(), "http://localhost:8081");
        assert!(CodeRunner::supports(&client, "python"));
        assert!(!CodeRunner::supports(&client, "py"));
        assert!(!CodeRunner::supports(&client, "rust"));
    }

    #[test]
    fn test_status_fallback_codes() {
        assert_eq!(code_for_status(StatusCode::NOT_FOUND), ErrorCode::ResourceNotFound);
        assert_eq!(code_for_status(StatusCode::BAD_GATEWAY), ErrorCode::ExternalServiceError);
    }
}
