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

//! Caller-facing output shapes.
//!
//! Two projections over already-validated catalog data, both pure:
//! the detailed shape for intent-search results and the name/description
//! summary for the "list everything" operation.

use crate::catalog::ApiCatalog;
use crate::descriptor::ApiDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full descriptor projection for matched APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedApi {
    pub name: String,
    pub endpoint: String,
    pub method: String,
    pub description: String,
    pub parameters: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(rename = "responseExample")]
    pub response_example: String,
}

impl From<&ApiDescriptor> for DetailedApi {
    fn from(d: &ApiDescriptor) -> Self {
        Self {
            name: d.name.clone(),
            endpoint: d.endpoint.clone(),
            method: d.method.clone(),
            description: d.description.clone(),
            parameters: d.parameters.clone(),
            headers: d.headers.clone(),
            response_example: d.response_example.clone(),
        }
    }
}

/// Summary projection: just enough to pick an API from a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSummary {
    pub name: String,
    pub description: String,
}

impl From<&ApiDescriptor> for ApiSummary {
    fn from(d: &ApiDescriptor) -> Self {
        Self {
            name: d.name.clone(),
            description: d.description.clone(),
        }
    }
}

/// The `{"apis": [...]}` envelope both tool results serialize into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub apis: Vec<T>,
}

/// Detailed projection of a match result, preserving matcher order.
pub fn detail(matched: &[&ApiDescriptor]) -> Vec<DetailedApi> {
    matched.iter().map(|d| DetailedApi::from(*d)).collect()
}

/// Summary projection of the whole catalog, in registration order.
pub fn summarize(catalog: &ApiCatalog) -> Vec<ApiSummary> {
    catalog.iter().map(ApiSummary::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str) -> ApiDescriptor {
        ApiDescriptor {
            name: name.to_string(),
            endpoint: "/v1/x".to_string(),
            method: "GET".to_string(),
            description: format!("{name} desc"),
            parameters: BTreeMap::new(),
            headers: None,
            response_example: "{}".to_string(),
        }
    }

    #[test]
    fn summary_covers_whole_catalog_in_order() {
        let mut catalog = ApiCatalog::new();
        for name in ["one", "two", "three"] {
            catalog
                .register(descriptor(name), vec![name.to_string()])
                .unwrap();
        }

        let summaries = summarize(&catalog);
        assert_eq!(summaries.len(), catalog.len());
        let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
    }

    #[test]
    fn summary_exposes_only_name_and_description() {
        let summary = ApiSummary::from(&descriptor("x"));
        let json = serde_json::to_value(&summary).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["description", "name"]);
    }

    #[test]
    fn detail_preserves_match_order() {
        let a = descriptor("a");
        let b = descriptor("b");
        let detailed = detail(&[&b, &a]);
        let names: Vec<_> = detailed.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn envelope_serializes_under_apis_key() {
        let envelope = ApiEnvelope {
            apis: vec![ApiSummary::from(&descriptor("x"))],
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["apis"][0]["name"], "x");
    }
}
