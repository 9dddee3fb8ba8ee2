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

//! End-to-end MCP flows against a catalog loaded from disk.

use apiscout_core::{load_catalog, ApiFinder, MatchPolicy};
use apiscout_server::mcp::protocol::{
    JsonRpcId, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION,
};
use apiscout_server::mcp::{transport, ChannelTransport, McpHandler};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::mpsc;

const CATALOG: &str = r#"[
    {
        "name": "stock_order",
        "endpoint": "/v1/orders",
        "method": "POST",
        "description": "Place a stock order",
        "parameters": {"symbol": "Ticker symbol", "qty": "Number of shares"},
        "responseExample": "{\"orderId\": \"abc-123\", \"status\": \"filled\"}",
        "keywords": ["buy", "sell", "order"]
    },
    {
        "name": "account_balance",
        "endpoint": "/v1/accounts/{id}/balance",
        "method": "GET",
        "description": "Fetch the current account balance",
        "parameters": {"id": "Account identifier"},
        "headers": {"X-Api-Key": "API key issued per tenant"},
        "responseExample": "{\"balance\": 1042.50, \"currency\": \"USD\"}",
        "keywords": ["account", "balance"]
    },
    {
        "name": "account_statement",
        "endpoint": "/v1/accounts/{id}/statement",
        "method": "GET",
        "description": "Download a monthly account statement",
        "parameters": {"id": "Account identifier", "month": "YYYY-MM"},
        "responseExample": "{\"entries\": []}",
        "keywords": ["account", "statement"]
    }
]"#;

fn catalog_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();
    file
}

fn handler_from_file(file: &NamedTempFile) -> McpHandler {
    let catalog = load_catalog(file.path()).unwrap();
    McpHandler::new(ApiFinder::new(Arc::new(catalog), MatchPolicy::Substring))
}

fn request(method: &str, params: Option<serde_json::Value>, id: i64) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: JSONRPC_VERSION.to_string(),
        method: method.to_string(),
        params,
        id: JsonRpcId::Number(id),
    }
}

fn tool_text(response: &JsonRpcResponse) -> (bool, String) {
    let result = response.result.as_ref().expect("tool result expected");
    let is_error = result["isError"].as_bool().unwrap();
    let text = result["content"][0]["text"].as_str().unwrap().to_string();
    (is_error, text)
}

#[test]
fn startup_fails_for_missing_catalog() {
    let err = load_catalog("/definitely/not/here/apis.json");
    assert!(err.is_err());
}

#[test]
fn startup_fails_for_malformed_catalog() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[{\"name\": ").unwrap();
    assert!(load_catalog(file.path()).is_err());
}

#[tokio::test]
async fn full_session_over_channel_transport() {
    let file = catalog_file();
    let handler = handler_from_file(&file);

    let (req_tx, req_rx) = mpsc::channel(8);
    let (resp_tx, mut resp_rx) = mpsc::channel(8);
    let mut channel = ChannelTransport::new(req_rx, resp_tx);

    req_tx
        .send(request(
            "initialize",
            Some(json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "0.0.1"}
            })),
            1,
        ))
        .await
        .unwrap();
    req_tx.send(request("tools/list", None, 2)).await.unwrap();
    req_tx
        .send(request(
            "tools/call",
            Some(json!({
                "name": "search_api",
                "arguments": {"intent": "I want to BUY some shares"}
            })),
            3,
        ))
        .await
        .unwrap();
    drop(req_tx);

    transport::serve(&mut channel, &handler).await.unwrap();

    let init = resp_rx.recv().await.unwrap();
    assert_eq!(init.result.unwrap()["serverInfo"]["name"], "apiscout-mcp");

    let tools = resp_rx.recv().await.unwrap();
    let tool_names: Vec<String> = tools.result.unwrap()["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(tool_names, vec!["search_api", "list_all_apis"]);

    let search = resp_rx.recv().await.unwrap();
    let (is_error, text) = tool_text(&search);
    assert!(!is_error);
    let payload: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(payload["apis"][0]["name"], "stock_order");
    assert_eq!(payload["apis"][0]["method"], "POST");
}

#[tokio::test]
async fn shared_keyword_returns_both_matches_in_order() {
    let file = catalog_file();
    let handler = handler_from_file(&file);

    let response = handler.handle_request(request(
        "tools/call",
        Some(json!({
            "name": "search_api",
            "arguments": {"intent": "show my account"}
        })),
        1,
    ));

    let (is_error, text) = tool_text(&response);
    assert!(!is_error);
    let payload: serde_json::Value = serde_json::from_str(&text).unwrap();
    let names: Vec<&str> = payload["apis"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["account_balance", "account_statement"]);
}

#[tokio::test]
async fn detailed_projection_keeps_headers_when_present() {
    let file = catalog_file();
    let handler = handler_from_file(&file);

    let response = handler.handle_request(request(
        "tools/call",
        Some(json!({
            "name": "search_api",
            "arguments": {"intent": "what is my balance"}
        })),
        1,
    ));

    let (_, text) = tool_text(&response);
    let payload: serde_json::Value = serde_json::from_str(&text).unwrap();
    let api = &payload["apis"][0];
    assert_eq!(api["name"], "account_balance");
    assert_eq!(api["headers"]["X-Api-Key"], "API key issued per tenant");
    // The statement API carries no headers and must omit the field.
    let statement_response = handler.handle_request(request(
        "tools/call",
        Some(json!({
            "name": "search_api",
            "arguments": {"intent": "monthly statement please"}
        })),
        2,
    ));
    let (_, text) = tool_text(&statement_response);
    let payload: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(payload["apis"][0].get("headers").is_none());
}

#[tokio::test]
async fn list_all_apis_covers_whole_catalog() {
    let file = catalog_file();
    let handler = handler_from_file(&file);

    let response = handler.handle_request(request(
        "tools/call",
        Some(json!({"name": "list_all_apis", "arguments": {}})),
        1,
    ));

    let (is_error, text) = tool_text(&response);
    assert!(!is_error);
    let payload: serde_json::Value = serde_json::from_str(&text).unwrap();
    let apis = payload["apis"].as_array().unwrap();
    assert_eq!(apis.len(), 3);
    for api in apis {
        let keys: Vec<&str> = api.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["description", "name"]);
    }
}

#[tokio::test]
async fn no_match_and_unknown_tool_keep_the_service_alive() {
    let file = catalog_file();
    let handler = handler_from_file(&file);

    let no_match = handler.handle_request(request(
        "tools/call",
        Some(json!({"name": "search_api", "arguments": {"intent": "check weather"}})),
        1,
    ));
    let (is_error, text) = tool_text(&no_match);
    assert!(!is_error);
    assert!(text.contains("No APIs matched"));

    let unknown = handler.handle_request(request(
        "tools/call",
        Some(json!({"name": "nope", "arguments": {}})),
        2,
    ));
    let (is_error, text) = tool_text(&unknown);
    assert!(is_error);
    assert_eq!(text, "Unknown tool: nope");

    // Still serving afterwards.
    let ping = handler.handle_request(request("ping", None, 3));
    assert!(ping.error.is_none());
}
