// ABOUTME: Supabase history store talking to the project's PostgREST endpoint
// ABOUTME: Inserts, lists newest-first, and deletes rows of the history table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use codemind_core::constants::service_names;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::HistoryStore;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{AssistantMode, InteractionRecord, NewInteraction};

const BACKEND: &str = "supabase";

#[derive(Debug, Serialize)]
struct InsertRow<'a> {
    mode: AssistantMode,
    language: &'a str,
    prompt: &'a str,
    code_output: &'a str,
}

/// Row as `PostgREST` returns it; `id` may be a bigint or a uuid
#[derive(Debug, Deserialize)]
struct HistoryRow {
    id: Value,
    mode: AssistantMode,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    code_output: Option<String>,
    created_at: String,
}

impl TryFrom<HistoryRow> for InteractionRecord {
    type Error = AppError;

    fn try_from(row: HistoryRow) -> AppResult<Self> {
        let id = match row.id {
            Value::String(id) => id,
            other => other.to_string(),
        };
        Ok(Self {
            id,
            mode: row.mode,
            language: row.language,
            prompt: row.prompt.unwrap_or_default(),
            code_output: row.code_output.unwrap_or_default(),
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Accepts `timestamptz` output and naive `timestamp` output (taken as UTC)
fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|ts| ts.and_utc())
        })
        .map_err(|e| {
            AppError::external_service(
                service_names::SUPABASE,
                format!("Invalid created_at '{raw}': {e}"),
            )
        })
}

/// History store backed by a Supabase table
pub struct SupabaseHistoryStore {
    client: Client,
    table_url: String,
    api_key: String,
}

impl SupabaseHistoryStore {
    /// Create a store for the project at `project_url`
    #[must_use]
    pub fn new(project_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            table_url: format!("{}/rest/v1/history", project_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(builder: RequestBuilder, operation: &str) -> AppResult<Response> {
        let response = builder.send().await.map_err(|e| {
            error!("Failed to reach Supabase during {}: {}", operation, e);
            AppError::external_unavailable(service_names::SUPABASE, format!("Failed to connect: {e}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let snippet: String = body.chars().take(200).collect();
        error!(status = %status, "Supabase {} failed: {}", operation, snippet);
        Err(match status.as_u16() {
            401 | 403 => AppError::external_auth(service_names::SUPABASE, snippet),
            429 => AppError::external_rate_limited(service_names::SUPABASE, snippet),
            _ => AppError::external_service(
                service_names::SUPABASE,
                format!("{operation} failed ({status}): {snippet}"),
            ),
        })
    }

    async fn rows(response: Response) -> AppResult<Vec<InteractionRecord>> {
        let rows: Vec<HistoryRow> = response.json().await.map_err(|e| {
            AppError::external_service(
                service_names::SUPABASE,
                format!("Failed to parse response: {e}"),
            )
        })?;
        rows.into_iter().map(InteractionRecord::try_from).collect()
    }

    async fn insert_inner(&self, interaction: &NewInteraction) -> AppResult<InteractionRecord> {
        let request = self
            .authorized(self.client.post(&self.table_url))
            .header("Prefer", "return=representation")
            .json(&[InsertRow {
                mode: interaction.mode,
                language: &interaction.language,
                prompt: &interaction.input,
                code_output: &interaction.output,
            }]);

        let response = Self::send(request, "insert").await?;
        Self::rows(response).await?.into_iter().next().ok_or_else(|| {
            AppError::external_service(service_names::SUPABASE, "Insert returned no row")
        })
    }

    async fn delete_inner(&self, id: &str) -> AppResult<()> {
        let request = self
            .authorized(self.client.delete(&self.table_url))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation");

        let response = Self::send(request, "delete").await?;
        if Self::rows(response).await?.is_empty() {
            return Err(AppError::not_found(format!("History record {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for SupabaseHistoryStore {
    fn name(&self) -> &'static str {
        BACKEND
    }

    #[instrument(skip(self, interaction), fields(mode = %interaction.mode))]
    async fn insert(&self, interaction: &NewInteraction) -> AppResult<InteractionRecord> {
        let started = Instant::now();
        let outcome = self.insert_inner(interaction).await;
        AppLogger::log_history_operation(
            "insert",
            BACKEND,
            outcome.is_ok(),
            started.elapsed().as_millis() as u64,
        );
        outcome
    }

    #[instrument(skip(self))]
    async fn list(&self) -> AppResult<Vec<InteractionRecord>> {
        let request = self
            .authorized(self.client.get(&self.table_url))
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        let records = Self::rows(Self::send(request, "list").await?).await?;
        debug!(count = records.len(), "Loaded history records from Supabase");
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> AppResult<()> {
        let started = Instant::now();
        let outcome = self.delete_inner(id).await;
        AppLogger::log_history_operation(
            "delete",
            BACKEND,
            outcome.is_ok(),
            started.elapsed().as_millis() as u64,
        );
        outcome
    }
}
