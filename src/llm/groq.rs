// ABOUTME: Groq LLM provider implementation for the completion service
// ABOUTME: Uses Groq's OpenAI-compatible chat completions API for Llama models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Groq Provider
//!
//! Implementation of the `LlmProvider` trait for Groq's LPU-accelerated inference.
//!
//! ## Configuration
//!
//! Set the `GROQ_API_KEY` environment variable with your API key from
//! Groq Console: <https://console.groq.com/keys>. `GROQ_MODEL` and
//! `GROQ_BASE_URL` override the model and endpoint.
//!
//! ## Example
//!
//! ```rust,no_run
//! use codemind::llm::{GroqProvider, LlmProvider, ChatRequest, ChatMessage};
//! use codemind::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = GroqProvider::new("gsk_...".to_owned());
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::user("Write hello world in C"),
//!     ]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use codemind_core::constants::{messages, service_names};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::config::environment::{CompletionConfig, DEFAULT_COMPLETION_MODEL, DEFAULT_GROQ_BASE_URL};
use crate::errors::AppError;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: Vec<GroqMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GroqMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for GroqMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    #[serde(default)]
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    #[serde(default)]
    message: Option<GroqResponseMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct GroqErrorResponse {
    error: GroqErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GroqErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Groq LLM provider
pub struct GroqProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqProvider {
    /// Create a new Groq provider with the given API key and default endpoint
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_COMPLETION_MODEL.to_owned(),
            base_url: DEFAULT_GROQ_BASE_URL.to_owned(),
        }
    }

    /// Build from configuration; `None` when no API key is configured
    #[must_use]
    pub fn from_config(config: &CompletionConfig) -> Option<Self> {
        config.api_key.as_ref().map(|key| {
            Self::new(key.clone())
                .with_model(&config.model)
                .with_base_url(&config.base_url)
        })
    }

    /// Override the default model
    #[must_use]
    pub fn with_model(mut self, model: &str) -> Self {
        model.clone_into(&mut self.model);
        self
    }

    /// Point the provider at another OpenAI-compatible endpoint
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    /// Parse error response from Groq API
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        let service = service_names::COMPLETION;
        if let Ok(error_response) = serde_json::from_str::<GroqErrorResponse>(body) {
            let detail = error_response.error.message;
            match status.as_u16() {
                401 => AppError::external_auth(service, format!("Authentication failed: {detail}")),
                429 => AppError::external_rate_limited(
                    service,
                    format!("Rate limit exceeded: {detail}"),
                ),
                _ => {
                    let error_type = error_response
                        .error
                        .error_type
                        .unwrap_or_else(|| "unknown".to_owned());
                    AppError::external_service(service, format!("{error_type} - {detail}"))
                }
            }
        } else {
            let snippet: String = body.chars().take(200).collect();
            match status.as_u16() {
                401 => AppError::external_auth(service, format!("API error ({status}): {snippet}")),
                429 => AppError::external_rate_limited(
                    service,
                    format!("API error ({status}): {snippet}"),
                ),
                _ => AppError::external_service(service, format!("API error ({status}): {snippet}")),
            }
        }
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "groq"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = self.model.as_str();

        debug!("Sending chat completion request to Groq");

        let groq_request = GroqRequest {
            model,
            messages: request.messages.iter().map(GroqMessage::from).collect(),
            stream: false,
        };

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&groq_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Groq API: {}", e);
                AppError::external_unavailable(
                    service_names::COMPLETION,
                    format!("Failed to connect: {e}"),
                )
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read Groq API response: {}", e);
            AppError::external_service(
                service_names::COMPLETION,
                format!("Failed to read response: {e}"),
            )
        })?;

        if !status.is_success() {
            let err = Self::parse_error_response(status, &body);
            error!(status = %status, "Groq API returned an error: {}", err.message);
            return Err(err);
        }

        let groq_response: GroqResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Groq API response: {}", e);
            AppError::external_service(
                service_names::COMPLETION,
                format!("Failed to parse response: {e}"),
            )
        })?;

        let choice = groq_response.choices.into_iter().next();
        let finish_reason = choice.as_ref().and_then(|c| c.finish_reason.clone());
        let content = choice
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| messages::NO_RESPONSE_GENERATED.to_owned());
        let served_by = groq_response.model.unwrap_or_else(|| model.to_owned());

        debug!(
            "Received response from Groq: {} chars, model: {}, finish_reason: {:?}",
            content.len(),
            served_by,
            finish_reason
        );

        Ok(ChatResponse {
            content,
            model: served_by,
            usage: groq_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemind_core::errors::ErrorCode;

    #[test]
    fn test_parse_error_response_status_mapping() {
        let body = r#"{"error":{"message":"bad key","type":"invalid_request_error"}}"#;
        let auth = GroqProvider::parse_error_response(reqwest::StatusCode::UNAUTHORIZED, body);
        assert_eq!(auth.code, ErrorCode::ExternalAuthFailed);

        let limited =
            GroqProvider::parse_error_response(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(limited.code, ErrorCode::ExternalRateLimited);

        let other = GroqProvider::parse_error_response(reqwest::StatusCode::BAD_REQUEST, body);
        assert_eq!(other.code, ErrorCode::ExternalServiceError);
        assert!(other.message.contains("bad key"));
    }

    #[test]
    fn test_unparseable_error_body_is_truncated() {
        let body = "x".repeat(500);
        let err = GroqProvider::parse_error_response(reqwest::StatusCode::BAD_GATEWAY, &body);
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert!(err.message.len() < 300);
    }

    #[test]
    fn test_from_config_requires_key() {
        let mut config = CompletionConfig {
            api_key: None,
            model: "llama-3.1-8b-instant".to_owned(),
            base_url: "http://localhost:9999/v1/".to_owned(),
        };
        assert!(GroqProvider::from_config(&config).is_none());

        config.api_key = Some("gsk_test".to_owned());
        let provider = GroqProvider::from_config(&config);
        assert!(provider.is_some());
        if let Some(provider) = provider {
            assert_eq!(provider.default_model(), "llama-3.1-8b-instant");
            assert_eq!(
                provider.api_url("models"),
                "http://localhost:9999/v1/models"
            );
        }
    }
}
