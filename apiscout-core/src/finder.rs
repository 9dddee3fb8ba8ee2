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

//! The finder facade the boundary layer talks to.
//!
//! Bundles a ready catalog with a matcher behind the two logical
//! operations the service exposes. Both are pure reads over the shared
//! catalog and safe to call from concurrent requests.

use crate::catalog::ApiCatalog;
use crate::matcher::{IntentMatcher, MatchPolicy};
use crate::projection::{self, ApiSummary, DetailedApi};
use std::sync::Arc;

/// Search/list operations over a populated, read-only catalog.
#[derive(Clone)]
pub struct ApiFinder {
    catalog: Arc<ApiCatalog>,
    matcher: IntentMatcher,
}

impl ApiFinder {
    pub fn new(catalog: Arc<ApiCatalog>, policy: MatchPolicy) -> Self {
        Self {
            catalog,
            matcher: IntentMatcher::new(policy),
        }
    }

    /// Detailed projection of every descriptor the intent matches. An
    /// empty result is a normal outcome, not an error.
    pub fn search_by_intent(&self, intent: &str) -> Vec<DetailedApi> {
        let matched = self.matcher.match_intent(&self.catalog, intent);
        projection::detail(&matched)
    }

    /// Summary projection of the entire catalog, registration order.
    pub fn list_all(&self) -> Vec<ApiSummary> {
        projection::summarize(&self.catalog)
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    pub fn match_policy(&self) -> MatchPolicy {
        self.matcher.policy()
    }
}
