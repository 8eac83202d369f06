// ABOUTME: Piston execution runner posting source files to the public Piston API
// ABOUTME: Maps editor languages to Piston runtime versions and normalizes its reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use async_trait::async_trait;
use codemind_core::constants::service_names;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ensure_supported, CodeRunner, ExecutionRequest, ExecutionResult};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

/// Piston language and version for each supported editor language
const RUNTIMES: &[(&str, &str, &str)] = &[
    ("javascript", "javascript", "18.15.0"),
    ("python", "python", "3.10.0"),
    ("java", "java", "15.0.2"),
    ("c", "c", "10.2.0"),
];

#[derive(Debug, Serialize)]
struct PistonRequest<'a> {
    language: &'static str,
    version: &'static str,
    files: [PistonFile<'a>; 1],
    stdin: &'a str,
}

#[derive(Debug, Serialize)]
struct PistonFile<'a> {
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct PistonResponse {
    #[serde(default)]
    run: Option<PistonStage>,
    #[serde(default)]
    compile: Option<PistonStage>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PistonStage {
    #[serde(default)]
    stdout: Option<String>,
    #[serde(default)]
    stderr: Option<String>,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

impl PistonStage {
    fn failed(&self) -> bool {
        self.code.is_some_and(|code| code != 0)
    }

    fn diagnostics(self) -> String {
        self.output
            .filter(|text| !text.is_empty())
            .or(self.stderr)
            .unwrap_or_default()
    }
}

impl From<PistonResponse> for ExecutionResult {
    fn from(response: PistonResponse) -> Self {
        if let Some(message) = response.message.filter(|m| !m.is_empty()) {
            return Self {
                stderr: message,
                ..Self::default()
            };
        }

        let compile_output = response
            .compile
            .filter(PistonStage::failed)
            .map(PistonStage::diagnostics)
            .unwrap_or_default();
        let run = response.run.unwrap_or_default();

        Self {
            stdout: run.stdout.unwrap_or_default(),
            stderr: run.stderr.unwrap_or_default(),
            compile_output,
            message: String::new(),
        }
    }
}

/// Runner backed by the Piston API (no key required)
pub struct PistonRunner {
    client: Client,
    url: String,
}

impl PistonRunner {
    /// Create a runner posting to `url` (the full `/execute` endpoint)
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_owned(),
        }
    }

    fn runtime(language: &str) -> Option<(&'static str, &'static str)> {
        RUNTIMES
            .iter()
            .find(|(name, _, _)| *name == language)
            .map(|(_, piston_language, version)| (*piston_language, *version))
    }
}

#[async_trait]
impl CodeRunner for PistonRunner {
    fn name(&self) -> &'static str {
        service_names::PISTON
    }

    fn supports(&self, language: &str) -> bool {
        Self::runtime(language).is_some()
    }

    #[instrument(skip(self, request), fields(language = %request.language))]
    async fn execute(&self, request: &ExecutionRequest) -> AppResult<ExecutionResult> {
        ensure_supported(self, &request.language)?;
        let (language, version) = Self::runtime(&request.language)
            .ok_or_else(|| AppError::unsupported_language(&request.language))?;

        debug!(version, "Sending code to Piston");
        let started = Instant::now();

        let response = self
            .client
            .post(&self.url)
            .json(&PistonRequest {
                language,
                version,
                files: [PistonFile {
                    content: &request.code,
                }],
                stdin: &request.stdin,
            })
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach Piston: {}", e);
                AppError::external_unavailable(service_names::PISTON, format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read Piston response: {}", e);
            AppError::external_service(service_names::PISTON, format!("Failed to read response: {e}"))
        })?;

        // Piston reports unknown runtimes as a non-2xx body carrying `message`
        let parsed = serde_json::from_str::<PistonResponse>(&body);
        let elapsed = started.elapsed().as_millis() as u64;

        let outcome = match parsed {
            Ok(reply) if status.is_success() || reply.message.is_some() => Ok(reply.into()),
            Ok(_) => Err(AppError::external_service(
                service_names::PISTON,
                format!("API error ({status})"),
            )),
            Err(e) => {
                error!("Failed to parse Piston response: {}", e);
                Err(AppError::external_service(
                    service_names::PISTON,
                    format!("Failed to parse response ({status}): {e}"),
                ))
            }
        };

        AppLogger::log_execution(self.name(), &request.language, outcome.is_ok(), elapsed);
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_map() {
        assert_eq!(PistonRunner::runtime("python"), Some(("python", "3.10.0")));
        assert_eq!(PistonRunner::runtime("c"), Some(("c", "10.2.0")));
        assert_eq!(PistonRunner::runtime("rust"), None);
    }

    #[test]
    fn test_successful_run_is_not_a_diagnostic() {
        let reply: PistonResponse = serde_json::from_str(
            r#"{"run":{"stdout":"hi\n","stderr":"","output":"hi\n","code":0}}"#,
        )
        .unwrap();
        let result = ExecutionResult::from(reply);
        assert_eq!(result.stdout, "hi\n");
        assert!(result.compile_output.is_empty());
    }

    #[test]
    fn test_failed_compile_stage_becomes_diagnostics() {
        let reply: PistonResponse = serde_json::from_str(
            r#"{"compile":{"stdout":"","stderr":"err","output":"main.c:2: error","code":1},
                "run":{"stdout":"","stderr":"","output":"","code":null}}"#,
        )
        .unwrap();
        let result = ExecutionResult::from(reply);
        assert_eq!(result.compile_output, "main.c:2: error");

        let ok_compile: PistonResponse = serde_json::from_str(
            r#"{"compile":{"output":"","code":0},"run":{"stdout":"Hello C","code":0}}"#,
        )
        .unwrap();
        assert!(ExecutionResult::from(ok_compile).compile_output.is_empty());
    }

    #[test]
    fn test_message_maps_to_stderr() {
        let reply: PistonResponse =
            serde_json::from_str(r#"{"message":"runtime not found"}"#).unwrap();
        let result = ExecutionResult::from(reply);
        assert_eq!(result.stderr, "runtime not found");
        assert!(result.stdout.is_empty());
    }
}
