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

//! MCP transport abstraction.
//!
//! The stdio transport speaks newline-delimited JSON-RPC, one message per
//! line, which is the framing desktop MCP clients use when they spawn a
//! server process. Logging must go to stderr in this mode; stdout carries
//! only protocol messages.

use crate::mcp::handlers::McpHandler;
use crate::mcp::protocol::{JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse};
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("transport closed")]
    Closed,
}

/// Transport abstraction for MCP JSON-RPC messages.
#[async_trait::async_trait]
pub trait McpTransport: Send {
    /// Receive the next request. `TransportError::Closed` means the peer
    /// went away cleanly; `Json` means a frame arrived but did not parse.
    async fn recv(&mut self) -> Result<JsonRpcRequest, TransportError>;

    /// Send a response.
    async fn send(&mut self, response: JsonRpcResponse) -> Result<(), TransportError>;
}

/// Newline-delimited JSON-RPC over stdin/stdout.
pub struct StdioTransport {
    reader: BufReader<tokio::io::Stdin>,
    writer: BufWriter<tokio::io::Stdout>,
    line: String,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
            writer: BufWriter::new(tokio::io::stdout()),
            line: String::new(),
        }
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl McpTransport for StdioTransport {
    async fn recv(&mut self) -> Result<JsonRpcRequest, TransportError> {
        loop {
            self.line.clear();
            let read = self.reader.read_line(&mut self.line).await?;
            if read == 0 {
                return Err(TransportError::Closed);
            }
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Ok(serde_json::from_str(trimmed)?);
        }
    }

    async fn send(&mut self, response: JsonRpcResponse) -> Result<(), TransportError> {
        let payload = serde_json::to_string(&response)?;
        self.writer.write_all(payload.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// Channel-backed transport for tests and in-process use.
pub struct ChannelTransport {
    rx: mpsc::Receiver<JsonRpcRequest>,
    tx: mpsc::Sender<JsonRpcResponse>,
}

impl ChannelTransport {
    pub fn new(rx: mpsc::Receiver<JsonRpcRequest>, tx: mpsc::Sender<JsonRpcResponse>) -> Self {
        Self { rx, tx }
    }
}

#[async_trait::async_trait]
impl McpTransport for ChannelTransport {
    async fn recv(&mut self) -> Result<JsonRpcRequest, TransportError> {
        self.rx.recv().await.ok_or(TransportError::Closed)
    }

    async fn send(&mut self, response: JsonRpcResponse) -> Result<(), TransportError> {
        self.tx
            .send(response)
            .await
            .map_err(|_| TransportError::Closed)
    }
}

/// Serve requests from a transport until the peer disconnects.
///
/// Unparseable frames get a JSON-RPC parse-error response and the loop
/// keeps going; notifications (null id, `notifications/` prefix) are
/// handled without a reply.
pub async fn serve<T: McpTransport>(
    transport: &mut T,
    handler: &McpHandler,
) -> Result<(), TransportError> {
    loop {
        let request = match transport.recv().await {
            Ok(request) => request,
            Err(TransportError::Closed) => {
                info!("MCP client disconnected");
                return Ok(());
            }
            Err(TransportError::Json(e)) => {
                warn!(error = %e, "Invalid JSON-RPC frame");
                let response = JsonRpcResponse::error(
                    JsonRpcId::Null,
                    JsonRpcError::parse_error(format!("Invalid JSON: {}", e)),
                );
                transport.send(response).await?;
                continue;
            }
            Err(e) => return Err(e),
        };

        let is_notification =
            request.id == JsonRpcId::Null && request.method.starts_with("notifications/");

        let response = handler.handle_request(request);
        if !is_notification {
            transport.send(response).await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::JSONRPC_VERSION;
    use apiscout_core::{ApiCatalog, ApiFinder, MatchPolicy};
    use std::sync::Arc;

    fn empty_handler() -> McpHandler {
        McpHandler::new(ApiFinder::new(
            Arc::new(ApiCatalog::new()),
            MatchPolicy::Substring,
        ))
    }

    fn request(method: &str, id: JsonRpcId) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params: None,
            id,
        }
    }

    #[tokio::test]
    async fn serve_responds_and_ends_on_close() {
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(4);
        let mut transport = ChannelTransport::new(req_rx, resp_tx);
        let handler = empty_handler();

        req_tx
            .send(request("ping", JsonRpcId::Number(1)))
            .await
            .unwrap();
        drop(req_tx);

        serve(&mut transport, &handler).await.unwrap();
        drop(transport);

        let response = resp_rx.recv().await.unwrap();
        assert_eq!(response.id, JsonRpcId::Number(1));
        assert!(response.result.is_some());
        assert!(resp_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn notifications_get_no_reply() {
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(4);
        let mut transport = ChannelTransport::new(req_rx, resp_tx);
        let handler = empty_handler();

        req_tx
            .send(request("notifications/initialized", JsonRpcId::Null))
            .await
            .unwrap();
        req_tx
            .send(request("ping", JsonRpcId::Number(2)))
            .await
            .unwrap();
        drop(req_tx);

        serve(&mut transport, &handler).await.unwrap();
        drop(transport);

        // Only the ping got a response.
        let response = resp_rx.recv().await.unwrap();
        assert_eq!(response.id, JsonRpcId::Number(2));
        assert!(resp_rx.recv().await.is_none());
    }
}
