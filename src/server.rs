// ABOUTME: HTTP server lifecycle: bind, serve the router, and shut down on ctrl-c
// ABOUTME: Thin wrapper over axum::serve used by the codemind-server binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::resources::ServerResources;
use crate::routes;

/// Bind the configured address and serve until ctrl-c
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    serve(listener, resources, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves
///
/// # Errors
///
/// Returns an error if the server fails
pub async fn serve(
    listener: TcpListener,
    resources: Arc<ServerResources>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let local: SocketAddr = listener.local_addr()?;
    info!("HTTP server listening on http://{local}");

    axum::serve(listener, routes::router(resources))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
