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

//! Model Context Protocol (MCP) boundary.
//!
//! Exposes the intent finder to MCP clients over JSON-RPC 2.0. Two tools:
//!
//! - `search_api` — detailed descriptors matching a free-text intent
//! - `list_all_apis` — name/description summary of the whole catalog
//!
//! Transports: newline-delimited stdio (the default, for clients that
//! spawn the server) and HTTP POST (`/mcp`).

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use handlers::McpHandler;
pub use server::mcp_router;
pub use transport::{ChannelTransport, McpTransport, StdioTransport, TransportError};
