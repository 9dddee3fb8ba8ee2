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

//! apiscout-core
//!
//! Maps free-text user intent to entries in a fixed catalog of external
//! API descriptors. The catalog is populated once at startup (usually from
//! a JSON catalog file) and read-only afterwards; matching is a
//! case-insensitive keyword scan in registration order.
//!
//! Intentionally *not* a search engine: there is no ranking, stemming,
//! fuzzy matching, or relevance scoring.

pub mod catalog;
pub mod descriptor;
pub mod finder;
pub mod ingest;
pub mod matcher;
pub mod projection;

pub use catalog::{ApiCatalog, CatalogError};
pub use descriptor::{ApiDescriptor, CatalogEntry, KeywordIndex};
pub use finder::ApiFinder;
pub use ingest::{build_catalog, load_catalog, IngestError};
pub use matcher::{IntentMatcher, MatchPolicy};
pub use projection::{ApiEnvelope, ApiSummary, DetailedApi};
