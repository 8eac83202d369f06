// ABOUTME: SQLite history store using sqlx runtime queries
// ABOUTME: Creates the history table on connect and stores RFC 3339 timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use super::HistoryStore;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{InteractionRecord, NewInteraction};

const BACKEND: &str = "sqlite";

/// History store backed by a local `SQLite` database
#[derive(Clone)]
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    /// Open (creating if needed) the database at `database_url` and ensure the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the schema cannot be applied
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");

        let pool = if in_memory {
            // Every in-memory connection is its own database
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(database_url)
                .await?
        } else {
            ensure_parent_dir(database_url).await?;
            let separator = if database_url.contains('?') { '&' } else { '?' };
            SqlitePool::connect(&format!("{database_url}{separator}mode=rwc")).await?
        };

        let store = Self { pool };
        store.migrate().await?;
        info!(in_memory, "History database ready");
        Ok(store)
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS history (
                id TEXT PRIMARY KEY,
                mode TEXT NOT NULL CHECK (mode IN ('debug', 'explain', 'generate')),
                language TEXT,
                prompt TEXT NOT NULL,
                code_output TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create history table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_history_created_at ON history(created_at)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create history index: {e}")))?;

        Ok(())
    }

    fn record_from_row(row: &SqliteRow) -> AppResult<InteractionRecord> {
        let mode: String = row.get("mode");
        let created_at: String = row.get("created_at");
        Ok(InteractionRecord {
            id: row.get("id"),
            mode: mode.parse()?,
            language: row.get("language"),
            prompt: row.get("prompt"),
            code_output: row.get("code_output"),
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| AppError::database(format!("Invalid created_at '{created_at}': {e}")))?
                .with_timezone(&Utc),
        })
    }
}

async fn ensure_parent_dir(database_url: &str) -> AppResult<()> {
    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            AppError::database(format!(
                "Failed to create database directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn insert(&self, interaction: &NewInteraction) -> AppResult<InteractionRecord> {
        let started = Instant::now();
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        let outcome = sqlx::query(
            r"
            INSERT INTO history (id, mode, language, prompt, code_output, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&id)
        .bind(interaction.mode.as_str())
        .bind(&interaction.language)
        .bind(&interaction.input)
        .bind(&interaction.output)
        .bind(created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert history record: {e}")));

        AppLogger::log_history_operation(
            "insert",
            BACKEND,
            outcome.is_ok(),
            started.elapsed().as_millis() as u64,
        );
        outcome?;

        Ok(InteractionRecord {
            id,
            mode: interaction.mode,
            language: Some(interaction.language.clone()),
            prompt: interaction.input.clone(),
            code_output: interaction.output.clone(),
            created_at,
        })
    }

    async fn list(&self) -> AppResult<Vec<InteractionRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, mode, language, prompt, code_output, created_at
            FROM history
            ORDER BY created_at DESC, rowid DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list history: {e}")))?;

        debug!(count = rows.len(), "Loaded history records");
        rows.iter().map(Self::record_from_row).collect()
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let started = Instant::now();
        let result = sqlx::query("DELETE FROM history WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete history record: {e}")));

        let outcome = match result {
            Ok(done) if done.rows_affected() == 0 => {
                Err(AppError::not_found(format!("History record {id}")))
            }
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        };

        AppLogger::log_history_operation(
            "delete",
            BACKEND,
            outcome.is_ok(),
            started.elapsed().as_millis() as u64,
        );
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::models::AssistantMode;
    use codemind_core::errors::ErrorCode;

    async fn store() -> SqliteHistoryStore {
        SqliteHistoryStore::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_list_newest_first() {
        let store = store().await;
        for input in ["first", "second", "third"] {
            let interaction =
                NewInteraction::from_action(AssistantMode::Explain, "python", input, "", "out");
            store.insert(&interaction).await.unwrap();
        }

        let records = store.list().await.unwrap();
        let inputs: Vec<&str> = records.iter().map(|r| r.prompt.as_str()).collect();
        assert_eq!(inputs, vec!["third", "second", "first"]);
        assert_eq!(records[0].language.as_deref(), Some("python"));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = store().await;
        let err = store.delete("nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let store = store().await;
        let keep = store
            .insert(&NewInteraction::from_action(
                AssistantMode::Generate,
                "c",
                "",
                "keep me",
                "out",
            ))
            .await
            .unwrap();
        let drop = store
            .insert(&NewInteraction::from_action(
                AssistantMode::Debug,
                "c",
                "drop me",
                "",
                "out",
            ))
            .await
            .unwrap();

        store.delete(&drop.id).await.unwrap();
        let remaining = store.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}/nested/history.db", dir.path().display());
        let store = SqliteHistoryStore::connect(&url).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert!(dir.path().join("nested/history.db").exists());
    }
}
