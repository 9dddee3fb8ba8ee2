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

//! MCP request handlers.
//!
//! Dispatches JSON-RPC 2.0 requests against the finder. Failures never
//! unwind past this layer: protocol-level problems become JSON-RPC error
//! objects, tool-level problems become `CallToolResult`s with
//! `isError: true`, and an empty match is an ordinary result.

use crate::mcp::protocol::*;
use crate::mcp::tools;
use apiscout_core::{ApiEnvelope, ApiFinder};
use serde_json::json;
use tracing::{info, warn};

/// MCP request handler over a ready finder.
#[derive(Clone)]
pub struct McpHandler {
    finder: ApiFinder,
}

impl McpHandler {
    pub fn new(finder: ApiFinder) -> Self {
        Self { finder }
    }

    /// Number of registered descriptors, for health reporting.
    pub fn catalog_len(&self) -> usize {
        self.finder.catalog_len()
    }

    /// Handle a single JSON-RPC request.
    pub fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!(method = %request.method, "MCP request received");

        match request.method.as_str() {
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "initialize" => self.handle_initialize(request.id),
            "initialized" | "notifications/initialized" => {
                info!("MCP client initialized");
                JsonRpcResponse::success(request.id, json!({}))
            }
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params),
            _ => {
                warn!(method = %request.method, "Unknown MCP method");
                JsonRpcResponse::error(request.id, JsonRpcError::method_not_found(&request.method))
            }
        }
    }

    fn handle_initialize(&self, id: JsonRpcId) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "apiscout-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
        }
    }

    fn handle_tools_list(&self, id: JsonRpcId) -> JsonRpcResponse {
        let result = ListToolsResult {
            tools: tools::definitions(),
        };
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
        }
    }

    fn handle_tools_call(
        &self,
        id: JsonRpcId,
        params: Option<serde_json::Value>,
    ) -> JsonRpcResponse {
        let call: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(call) => call,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                    )
                }
            },
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing tools/call params"),
                )
            }
        };

        let result = self.execute_tool(&call);
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
        }
    }

    /// Run one tool call. Every failure path collapses into an
    /// `isError` result so the service keeps serving.
    fn execute_tool(&self, call: &CallToolParams) -> CallToolResult {
        match call.name.as_str() {
            tools::SEARCH_API => {
                let intent = match call.arguments.get("intent").and_then(|v| v.as_str()) {
                    Some(intent) => intent,
                    None => {
                        return CallToolResult::error_text(
                            "search_api requires a string 'intent' argument",
                        )
                    }
                };
                self.search_api(intent)
            }
            tools::LIST_ALL_APIS => self.list_all_apis(),
            other => {
                warn!(tool = %other, "Unknown tool requested");
                CallToolResult::error_text(format!("Unknown tool: {}", other))
            }
        }
    }

    fn search_api(&self, intent: &str) -> CallToolResult {
        let apis = self.finder.search_by_intent(intent);
        if apis.is_empty() {
            return CallToolResult::text(
                "No APIs matched the given intent. Try phrasing the request differently.",
            );
        }

        let count = apis.len();
        match serde_json::to_string_pretty(&ApiEnvelope { apis }) {
            Ok(text) => {
                info!(matches = count, "search_api matched");
                CallToolResult::text(text)
            }
            Err(e) => CallToolResult::error_text(format!("Failed to format search result: {}", e)),
        }
    }

    fn list_all_apis(&self) -> CallToolResult {
        let apis = self.finder.list_all();
        if apis.is_empty() {
            return CallToolResult::text("No APIs are registered.");
        }

        match serde_json::to_string_pretty(&ApiEnvelope { apis }) {
            Ok(text) => CallToolResult::text(text),
            Err(e) => CallToolResult::error_text(format!("Failed to format API list: {}", e)),
        }
    }
}
