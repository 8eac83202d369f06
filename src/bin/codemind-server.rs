// ABOUTME: HTTP server binary for the CodeMind editor backend
// ABOUTME: Loads environment config, initializes logging and services, serves until ctrl-c
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `CodeMind` Server Binary
//!
//! Serves the assistant, run-code, and history API.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use codemind::{config::environment::ServerConfig, logging, resources::ServerResources, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "codemind-server")]
#[command(about = "CodeMind - AI assistant, code runner, and history API for the editor")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting CodeMind server");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config).await?);
    display_available_endpoints(&resources);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

fn display_available_endpoints(resources: &ServerResources) {
    let base = format!(
        "http://{}:{}",
        resources.config.host, resources.config.http_port
    );
    info!("=== Available API Endpoints ===");
    info!("  POST   {base}/api/ai-assistant");
    info!("  POST   {base}/api/run-code");
    info!("  GET    {base}/api/history");
    info!("  POST   {base}/api/history");
    info!("  DELETE {base}/api/history/:id");
    info!("  GET    {base}/health");
    info!("  GET    {base}/ready");
}
