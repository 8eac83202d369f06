// ABOUTME: History store abstraction for persisted assistant interactions
// ABOUTME: Flat collection with insert, newest-first listing, and delete by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Interaction History
//!
//! One record is written per successful assistant action and is never
//! updated afterwards. Two backends are provided: a local `SQLite` file
//! and a Supabase project reached over `PostgREST`.

mod sqlite;
mod supabase;

pub use sqlite::SqliteHistoryStore;
pub use supabase::SupabaseHistoryStore;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::environment::{HistoryBackend, HistoryConfig};
use crate::errors::{AppError, AppResult};
use crate::models::{HistoryEntry, InteractionRecord, NewInteraction};

/// Record-oriented persistence for interactions
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Store one interaction; the store assigns id and timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects or cannot receive the write
    async fn insert(&self, interaction: &NewInteraction) -> AppResult<InteractionRecord>;

    /// Every record, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    async fn list(&self) -> AppResult<Vec<InteractionRecord>>;

    /// Delete one record
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no record has `id`, or a store error
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Body of `GET /api/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryList {
    /// Display-shaped records, newest first
    pub entries: Vec<HistoryEntry>,
    /// Number of entries
    pub total: usize,
}

impl From<Vec<InteractionRecord>> for HistoryList {
    fn from(records: Vec<InteractionRecord>) -> Self {
        let entries: Vec<HistoryEntry> = records.into_iter().map(HistoryEntry::from).collect();
        Self {
            total: entries.len(),
            entries,
        }
    }
}

/// Open the configured backend
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the Supabase
/// settings are incomplete
pub async fn connect(config: &HistoryConfig) -> AppResult<Arc<dyn HistoryStore>> {
    match config.backend {
        HistoryBackend::Sqlite => Ok(Arc::new(
            SqliteHistoryStore::connect(&config.database_url).await?,
        )),
        HistoryBackend::Supabase => {
            let (Some(url), Some(key)) = (&config.supabase_url, &config.supabase_key) else {
                return Err(AppError::config_missing(
                    "SUPABASE_URL and SUPABASE_ANON_KEY are required for the supabase backend",
                ));
            };
            Ok(Arc::new(SupabaseHistoryStore::new(url, key)))
        }
    }
}
