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

//! Intent matching: free text in, matching descriptors out.
//!
//! The matcher lowercases the whole intent and scans every descriptor's
//! keyword list in registration order. One case-insensitive hit selects
//! the descriptor; no tokenization, stemming, or scoring is attempted.
//!
//! Substring matching trades precision for simplicity: a short keyword can
//! fire inside an unrelated word ("art" matches "startup"). That behavior
//! is deliberate and kept for compatibility, but it is named as a policy so
//! callers can opt into whole-word matching instead.

use crate::catalog::ApiCatalog;
use crate::descriptor::ApiDescriptor;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a keyword is tested against the normalized intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Keyword anywhere in the intent (the compatibility default).
    #[default]
    Substring,
    /// Keyword must equal a whole alphanumeric word of the intent.
    WholeWord,
}

impl MatchPolicy {
    /// Both arguments must already be lowercased.
    fn is_hit(&self, intent: &str, keyword: &str) -> bool {
        match self {
            MatchPolicy::Substring => intent.contains(keyword),
            MatchPolicy::WholeWord => intent
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| word == keyword),
        }
    }
}

/// Maps free text to the subset of catalog descriptors whose keyword set
/// overlaps it.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentMatcher {
    policy: MatchPolicy,
}

impl IntentMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Return every descriptor with at least one keyword hit, in
    /// registration order, each at most once.
    ///
    /// The scan collects matched names first and resolves them back
    /// through the catalog; a name that fails to resolve is skipped rather
    /// than failing the whole request.
    pub fn match_intent<'c>(&self, catalog: &'c ApiCatalog, intent: &str) -> Vec<&'c ApiDescriptor> {
        let normalized = intent.to_lowercase();

        let mut matched_names: Vec<&str> = Vec::new();
        for (descriptor, index) in catalog.entries() {
            let hit = index
                .keywords()
                .iter()
                .any(|keyword| self.is_keyword_hit(&normalized, keyword));
            if hit {
                matched_names.push(&descriptor.name);
            }
        }

        let matched: Vec<&'c ApiDescriptor> = matched_names
            .into_iter()
            .filter_map(|name| catalog.get_by_name(name))
            .collect();

        debug!(
            intent_len = intent.len(),
            matches = matched.len(),
            policy = ?self.policy,
            "intent matched"
        );
        matched
    }

    fn is_keyword_hit(&self, normalized_intent: &str, keyword: &str) -> bool {
        // Empty keywords are rejected at registration; guard anyway so a
        // hand-built catalog cannot make everything match.
        if keyword.is_empty() {
            return false;
        }
        self.policy
            .is_hit(normalized_intent, &keyword.to_lowercase())
    }
}
