// ABOUTME: Judge0 CE execution runner using synchronous submissions over RapidAPI
// ABOUTME: Maps editor languages to Judge0 numeric language ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use async_trait::async_trait;
use codemind_core::constants::service_names;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ensure_supported, CodeRunner, ExecutionRequest, ExecutionResult};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

const DEFAULT_RAPIDAPI_HOST: &str = "judge0-ce.p.rapidapi.com";

/// Judge0 status id for a run that finished normally
const STATUS_ACCEPTED: u32 = 3;

fn language_id(language: &str) -> Option<u32> {
    match language {
        "javascript" => Some(63),
        "python" => Some(71),
        "java" => Some(62),
        "c" => Some(50),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
struct SubmissionRequest<'a> {
    language_id: u32,
    source_code: &'a str,
    stdin: &'a str,
}

#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    #[serde(default)]
    stdout: Option<String>,
    #[serde(default)]
    stderr: Option<String>,
    #[serde(default)]
    compile_output: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<SubmissionStatus>,
}

#[derive(Debug, Deserialize)]
struct SubmissionStatus {
    id: u32,
    #[serde(default)]
    description: String,
}

impl From<SubmissionResponse> for ExecutionResult {
    fn from(response: SubmissionResponse) -> Self {
        let mut message = response.message.unwrap_or_default();
        // Time limit and internal errors arrive with every output field null
        if message.is_empty() {
            if let Some(status) = response.status.filter(|s| s.id != STATUS_ACCEPTED) {
                message = status.description;
            }
        }

        Self {
            stdout: response.stdout.unwrap_or_default(),
            stderr: response.stderr.unwrap_or_default(),
            compile_output: response.compile_output.unwrap_or_default(),
            message,
        }
    }
}

/// Runner backed by Judge0 CE through `RapidAPI`
pub struct Judge0Runner {
    client: Client,
    base_url: String,
    api_key: String,
    host: String,
}

impl Judge0Runner {
    /// Create a runner against `base_url` (without the `/submissions` path)
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let host = Url::parse(base_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_owned))
            .unwrap_or_else(|| DEFAULT_RAPIDAPI_HOST.to_owned());

        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            host,
        }
    }

    fn submissions_url(&self) -> String {
        format!(
            "{}/submissions?base64_encoded=false&wait=true",
            self.base_url
        )
    }
}

#[async_trait]
impl CodeRunner for Judge0Runner {
    fn name(&self) -> &'static str {
        service_names::JUDGE0
    }

    fn supports(&self, language: &str) -> bool {
        language_id(language).is_some()
    }

    #[instrument(skip(self, request), fields(language = %request.language))]
    async fn execute(&self, request: &ExecutionRequest) -> AppResult<ExecutionResult> {
        ensure_supported(self, &request.language)?;
        let language_id = language_id(&request.language)
            .ok_or_else(|| AppError::unsupported_language(&request.language))?;

        debug!(language_id, "Submitting code to Judge0");
        let started = Instant::now();

        let response = self
            .client
            .post(self.submissions_url())
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .json(&SubmissionRequest {
                language_id,
                source_code: &request.code,
                stdin: &request.stdin,
            })
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach Judge0: {}", e);
                AppError::external_unavailable(service_names::JUDGE0, format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        let outcome = if status.is_success() {
            response
                .json::<SubmissionResponse>()
                .await
                .map(ExecutionResult::from)
                .map_err(|e| {
                    error!("Failed to parse Judge0 response: {}", e);
                    AppError::external_service(
                        service_names::JUDGE0,
                        format!("Failed to parse response: {e}"),
                    )
                })
        } else {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            error!(status = %status, "Judge0 returned an error");
            Err(match status.as_u16() {
                401 | 403 => AppError::external_auth(service_names::JUDGE0, snippet),
                429 => AppError::external_rate_limited(service_names::JUDGE0, snippet),
                _ => AppError::external_service(
                    service_names::JUDGE0,
                    format!("API error ({status}): {snippet}"),
                ),
            })
        };

        let elapsed = started.elapsed().as_millis() as u64;
        AppLogger::log_execution(self.name(), &request.language, outcome.is_ok(), elapsed);
        outcome
    }
}
