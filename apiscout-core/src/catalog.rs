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

//! The API catalog: the authoritative, registration-ordered store of
//! descriptors and their keyword indexes.
//!
//! A catalog is populated once at startup and read-only afterwards, so it
//! needs no interior locking; share it behind an `Arc` and call lookups
//! from as many tasks as you like.
//!
//! ## Duplicate names
//!
//! Registering a name that already exists overwrites both the descriptor
//! and its keyword index atomically, keeping the original
//! registration-order slot. Duplicates are logged as warnings since they
//! usually indicate a catalog file mistake.

use crate::descriptor::{ApiDescriptor, KeywordIndex};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, warn};

/// Registration-time validation failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("descriptor name cannot be empty")]
    EmptyName,

    #[error("descriptor '{name}' has an empty keyword at position {position}")]
    EmptyKeyword { name: String, position: usize },
}

/// In-memory store of API descriptors plus the parallel keyword index,
/// keyed by descriptor name.
#[derive(Debug, Default)]
pub struct ApiCatalog {
    /// Descriptors in registration order.
    descriptors: Vec<ApiDescriptor>,
    /// Keyword index parallel to `descriptors`.
    keywords: Vec<KeywordIndex>,
    /// name -> slot in the parallel vectors.
    by_name: HashMap<String, usize>,
}

impl ApiCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor and its keyword list.
    ///
    /// An empty name or an empty keyword *string* is rejected: the empty
    /// string is a substring of every intent, so an empty keyword would
    /// make the descriptor match everything. An empty keyword *list* is
    /// accepted with a warning; the descriptor stays listable but can
    /// never be found by intent search.
    pub fn register(
        &mut self,
        descriptor: ApiDescriptor,
        keywords: Vec<String>,
    ) -> Result<(), CatalogError> {
        if descriptor.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if let Some(position) = keywords.iter().position(|k| k.is_empty()) {
            return Err(CatalogError::EmptyKeyword {
                name: descriptor.name.clone(),
                position,
            });
        }
        if keywords.is_empty() {
            warn!(
                name = %descriptor.name,
                "registering descriptor with no keywords; it will be unreachable by intent search"
            );
        }

        let name = descriptor.name.clone();
        let index = KeywordIndex::new(keywords);

        match self.by_name.get(&name).copied() {
            Some(slot) => {
                warn!(name = %name, "duplicate registration, overwriting existing descriptor");
                self.descriptors[slot] = descriptor;
                self.keywords[slot] = index;
            }
            None => {
                let slot = self.descriptors.len();
                self.descriptors.push(descriptor);
                self.keywords.push(index);
                self.by_name.insert(name.clone(), slot);
            }
        }

        info!(name = %name, total = self.descriptors.len(), "registered API descriptor");
        Ok(())
    }

    /// Look up a descriptor by exact name.
    pub fn get_by_name(&self, name: &str) -> Option<&ApiDescriptor> {
        self.by_name.get(name).map(|&slot| &self.descriptors[slot])
    }

    /// Keyword index for a descriptor, by name.
    pub fn keywords_for(&self, name: &str) -> Option<&KeywordIndex> {
        self.by_name.get(name).map(|&slot| &self.keywords[slot])
    }

    /// All descriptors in registration order. Restartable: each call
    /// yields the same sequence absent further registrations.
    pub fn iter(&self) -> impl Iterator<Item = &ApiDescriptor> {
        self.descriptors.iter()
    }

    /// `(descriptor, keyword index)` pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&ApiDescriptor, &KeywordIndex)> {
        self.descriptors.iter().zip(self.keywords.iter())
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
