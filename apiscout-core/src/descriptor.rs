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

//! Catalog record types.
//!
//! An [`ApiDescriptor`] describes one externally callable API: where it
//! lives, how to call it, and what a response looks like. Descriptors are
//! created once at registration time and never mutated afterwards.
//!
//! Field names serialize in camelCase because that is the wire format the
//! existing catalog files and MCP clients already use.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Describes one externally callable API.
///
/// `name` is the primary key within a catalog. `response_example` is an
/// opaque string blob; it is not required to be valid JSON and is never
/// parsed or validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDescriptor {
    /// Unique identifier, primary key within the catalog.
    pub name: String,

    /// URL path template (e.g., "/v1/orders/{id}").
    pub endpoint: String,

    /// HTTP verb ("GET", "POST", ...). Stored verbatim.
    pub method: String,

    /// Human-readable summary of what the API does.
    pub description: String,

    /// Parameter name -> human-readable description.
    pub parameters: BTreeMap<String, String>,

    /// Header name -> description, present only for APIs that require
    /// custom headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    /// Literal example response body, kept as an opaque string.
    #[serde(rename = "responseExample")]
    pub response_example: String,
}

/// The searchable surface of one descriptor: the ordered keyword list that
/// triggers it during intent matching.
///
/// Order does not affect matching but is preserved so results are
/// reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordIndex {
    keywords: Vec<String>,
}

impl KeywordIndex {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }
}

/// One record of the catalog file: a descriptor plus its keyword list.
///
/// The file format is a JSON array of these objects; ingestion partitions
/// each into `(descriptor, keywords)` before registering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub descriptor: ApiDescriptor,
    pub keywords: Vec<String>,
}

impl CatalogEntry {
    /// Split the entry into the two halves the catalog stores separately.
    pub fn into_parts(self) -> (ApiDescriptor, Vec<String>) {
        (self.descriptor, self.keywords)
    }
}
