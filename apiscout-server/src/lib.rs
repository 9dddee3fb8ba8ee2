// Copyright 2025 Apiscout Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Apiscout MCP server.
//!
//! Loads the API catalog, then serves the two lookup tools over the
//! configured transport. Catalog loading is all-or-nothing: any failure
//! aborts startup before the server accepts a single request, so a
//! partially populated catalog can never serve.

pub mod config;
pub mod mcp;

use anyhow::{Context, Result};
use apiscout_core::ApiFinder;
use config::{ServerConfig, TransportKind};
use mcp::{McpHandler, StdioTransport};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub async fn run_server(config: ServerConfig) -> Result<()> {
    // Logs go to stderr unconditionally: in stdio mode stdout is the
    // JSON-RPC stream and must stay clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apiscout_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Apiscout MCP server");
    config.validate()?;

    let catalog = apiscout_core::load_catalog(&config.catalog.path).with_context(|| {
        format!(
            "failed to load API catalog from {:?}",
            config.catalog.path
        )
    })?;
    tracing::info!(
        apis = catalog.len(),
        policy = ?config.catalog.match_policy,
        "catalog ready"
    );

    let finder = ApiFinder::new(Arc::new(catalog), config.catalog.match_policy);
    let handler = McpHandler::new(finder);

    match config.server.transport {
        TransportKind::Stdio => {
            tracing::info!("Serving MCP over stdio");
            let mut transport = StdioTransport::new();
            mcp::transport::serve(&mut transport, &handler)
                .await
                .context("stdio transport failed")?;
        }
        TransportKind::Http => {
            let addr = config.socket_addr()?;
            let app = mcp::mcp_router(handler, config.server.enable_cors);
            tracing::info!("MCP server listening on http://{}", addr);

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind {}", addr))?;
            axum::serve(listener, app)
                .await
                .context("HTTP server failed")?;
        }
    }

    Ok(())
}
