// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Resolves ports, completion credentials, runner choice, and history backend from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management
//!
//! Configuration is environment-only. A missing completion key is not a boot
//! failure: the server starts and every assistant request answers with the
//! fixed configuration error instead.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

/// Default HTTP port for the backend
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default completion model
pub const DEFAULT_COMPLETION_MODEL: &str = "llama-3.3-70b-versatile";

/// Default Groq API base (OpenAI-compatible)
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default Piston execute endpoint (no key required)
pub const DEFAULT_PISTON_URL: &str = "https://emkc.org/api/v2/piston/execute";

/// Default Judge0 CE endpoint on `RapidAPI`
pub const DEFAULT_JUDGE0_URL: &str = "https://judge0-ce.p.rapidapi.com";

/// Default history database
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/history.db";

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Which execution service backs `/api/run-code`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunnerKind {
    /// Piston public API
    #[default]
    Piston,
    /// Judge0 CE via `RapidAPI`
    Judge0,
}

impl RunnerKind {
    fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "piston" => Ok(Self::Piston),
            "judge0" => Ok(Self::Judge0),
            other => bail!("Invalid CODE_RUNNER value '{other}' (expected piston or judge0)"),
        }
    }
}

/// Which store keeps interaction history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    /// Local `SQLite` via sqlx
    #[default]
    Sqlite,
    /// Supabase `PostgREST`
    Supabase,
}

impl HistoryBackend {
    fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "supabase" => Ok(Self::Supabase),
            other => bail!("Invalid HISTORY_BACKEND value '{other}' (expected sqlite or supabase)"),
        }
    }
}

/// Completion service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Groq API key; `None` means every assistant request fails with a config error
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// API base URL
    pub base_url: String,
}

/// Execution service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Selected provider
    pub runner: RunnerKind,
    /// Piston execute endpoint
    pub piston_url: String,
    /// Judge0 base URL
    pub judge0_url: String,
    /// `RapidAPI` key for Judge0
    pub judge0_api_key: Option<String>,
}

/// History store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Selected backend
    pub backend: HistoryBackend,
    /// sqlx connection string for the sqlite backend
    pub database_url: String,
    /// Supabase project URL
    pub supabase_url: Option<String>,
    /// Supabase anon key
    pub supabase_key: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// HTTP listen host
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Completion service
    pub completion: CompletionConfig,
    /// Execution service
    pub execution: ExecutionConfig,
    /// History store
    pub history: HistoryConfig,
    /// Comma-separated CORS origins, `*` for any
    pub cors_allowed_origins: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed, or if the
    /// selected backend lacks its required settings
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same conditions as [`ServerConfig::from_env`]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var_or =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let http_port = var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
            .parse()
            .context("Invalid HTTP_PORT value")?;

        let execution = ExecutionConfig {
            runner: RunnerKind::parse(&var_or("CODE_RUNNER", "piston"))?,
            piston_url: var_or("PISTON_API_URL", DEFAULT_PISTON_URL),
            judge0_url: var_or("JUDGE0_API_URL", DEFAULT_JUDGE0_URL),
            judge0_api_key: non_empty("JUDGE0_API_KEY"),
        };
        if execution.runner == RunnerKind::Judge0 && execution.judge0_api_key.is_none() {
            bail!("CODE_RUNNER=judge0 requires JUDGE0_API_KEY");
        }

        let history = HistoryConfig {
            backend: HistoryBackend::parse(&var_or("HISTORY_BACKEND", "sqlite"))?,
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            supabase_url: non_empty("SUPABASE_URL"),
            supabase_key: non_empty("SUPABASE_ANON_KEY"),
        };
        if history.backend == HistoryBackend::Supabase
            && (history.supabase_url.is_none() || history.supabase_key.is_none())
        {
            bail!("HISTORY_BACKEND=supabase requires SUPABASE_URL and SUPABASE_ANON_KEY");
        }

        Ok(Self {
            http_port,
            host: var_or("HOST", "127.0.0.1"),
            environment: Environment::from_str_or_default(&var_or("ENVIRONMENT", "development")),
            completion: CompletionConfig {
                api_key: non_empty("GROQ_API_KEY"),
                model: var_or("GROQ_MODEL", DEFAULT_COMPLETION_MODEL),
                base_url: var_or("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
            },
            execution,
            history,
            cors_allowed_origins: var_or("CORS_ALLOWED_ORIGINS", "*"),
        })
    }

    /// Log-safe one-line-per-setting summary; never includes secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "CodeMind Server Configuration:\n\
             - HTTP: {}:{}\n\
             - Environment: {}\n\
             - Completion: {} ({})\n\
             - Code Runner: {:?}\n\
             - History Backend: {:?}",
            self.host,
            self.http_port,
            self.environment,
            self.completion.model,
            if self.completion.api_key.is_some() {
                "key configured"
            } else {
                "key missing"
            },
            self.execution.runner,
            self.history.backend,
        )
    }
}
