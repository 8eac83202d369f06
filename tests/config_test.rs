// ABOUTME: Tests for environment-driven server and logging configuration
// ABOUTME: Env-mutating cases run serially so they do not race each other
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use codemind::{
    config::environment::{Environment, HistoryBackend, RunnerKind, ServerConfig},
    logging::{LogFormat, LoggingConfig},
};
use serial_test::serial;

const MANAGED_VARS: &[&str] = &[
    "HTTP_PORT",
    "HOST",
    "ENVIRONMENT",
    "GROQ_API_KEY",
    "GROQ_MODEL",
    "CODE_RUNNER",
    "JUDGE0_API_KEY",
    "HISTORY_BACKEND",
    "DATABASE_URL",
    "SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "CORS_ALLOWED_ORIGINS",
    "RUST_LOG",
    "LOG_FORMAT",
    "LOG_INCLUDE_LOCATION",
    "SERVICE_NAME",
];

fn clear_env() {
    for var in MANAGED_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8081);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.execution.runner, RunnerKind::Piston);
    assert_eq!(config.history.backend, HistoryBackend::Sqlite);
    assert_eq!(config.cors_allowed_origins, "*");
    assert!(config.completion.api_key.is_none());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    env::set_var("HTTP_PORT", "9000");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("GROQ_API_KEY", "gsk_live");
    env::set_var("GROQ_MODEL", "llama-3.1-8b-instant");
    env::set_var("CODE_RUNNER", "judge0");
    env::set_var("JUDGE0_API_KEY", "rapid");
    env::set_var("HISTORY_BACKEND", "supabase");
    env::set_var("SUPABASE_URL", "https://project.supabase.co");
    env::set_var("SUPABASE_ANON_KEY", "anon");
    env::set_var("CORS_ALLOWED_ORIGINS", "http://localhost:3000");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9000);
    assert!(config.environment.is_production());
    assert_eq!(config.completion.api_key.as_deref(), Some("gsk_live"));
    assert_eq!(config.completion.model, "llama-3.1-8b-instant");
    assert_eq!(config.execution.runner, RunnerKind::Judge0);
    assert_eq!(config.history.backend, HistoryBackend::Supabase);
    assert_eq!(config.cors_allowed_origins, "http://localhost:3000");
    assert!(!config.summary().contains("gsk_live"));

    clear_env();
}

#[test]
#[serial]
fn test_from_env_rejects_unknown_runner() {
    clear_env();
    env::set_var("CODE_RUNNER", "docker");

    let err = ServerConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("CODE_RUNNER"));

    clear_env();
}

#[test]
#[serial]
fn test_supabase_without_key_fails() {
    clear_env();
    env::set_var("HISTORY_BACKEND", "supabase");
    env::set_var("SUPABASE_URL", "https://project.supabase.co");

    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_logging_from_env() {
    clear_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("SERVICE_NAME", "codemind-test");

    let config = LoggingConfig::from_env();
    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.service_name, "codemind-test");
    assert!(!config.include_location);

    env::set_var("ENVIRONMENT", "production");
    let production = LoggingConfig::from_env();
    assert!(production.include_location);
    assert!(production.include_spans);

    clear_env();
}

#[test]
fn test_cli_logging_is_quiet_unless_verbose() {
    let quiet = LoggingConfig::for_cli(false);
    assert_eq!(quiet.level, "warn");
    assert_eq!(quiet.format, LogFormat::Compact);

    assert_eq!(LoggingConfig::for_cli(true).level, "debug");
}
