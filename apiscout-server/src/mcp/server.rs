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

//! HTTP transport: JSON-RPC over POST /mcp, plus a health route.

use crate::mcp::handlers::McpHandler;
use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared state for the HTTP MCP routes.
#[derive(Clone)]
pub struct McpServerState {
    pub handler: McpHandler,
}

/// Build the MCP router.
pub fn mcp_router(handler: McpHandler, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/mcp", post(handle_mcp_request))
        .route("/mcp/health", get(handle_mcp_health))
        .with_state(McpServerState { handler })
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}

/// Handle an MCP JSON-RPC request over HTTP POST.
async fn handle_mcp_request(
    State(state): State<McpServerState>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    Json(state.handler.handle_request(request))
}

/// MCP server status for monitoring.
async fn handle_mcp_health(State(state): State<McpServerState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "protocol_version": MCP_PROTOCOL_VERSION,
        "server_name": "apiscout-mcp",
        "server_version": env!("CARGO_PKG_VERSION"),
        "registered_apis": state.handler.catalog_len(),
    }))
}
