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

//! Tool definitions exposed via tools/list.

use crate::mcp::protocol::Tool;
use serde_json::json;

pub const SEARCH_API: &str = "search_api";
pub const LIST_ALL_APIS: &str = "list_all_apis";

/// The full tool listing this server advertises.
pub fn definitions() -> Vec<Tool> {
    vec![search_api_tool(), list_all_apis_tool()]
}

/// `search_api`: find API descriptors matching a free-text intent.
pub fn search_api_tool() -> Tool {
    Tool {
        name: SEARCH_API.to_string(),
        description: Some(
            "Search registered API descriptors matching a free-text user intent".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "intent": {
                    "type": "string",
                    "description": "The user's intent or request text"
                }
            },
            "required": ["intent"]
        }),
    }
}

/// `list_all_apis`: summary listing of every registered API.
pub fn list_all_apis_tool() -> Tool {
    Tool {
        name: LIST_ALL_APIS.to_string(),
        description: Some("List the name and description of every registered API".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
    }
}
