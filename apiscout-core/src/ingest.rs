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

//! Catalog file ingestion.
//!
//! The catalog file is a JSON array of descriptor objects, each carrying a
//! `keywords` array alongside the descriptor fields. Loading it is a
//! one-shot blocking operation performed before the service is considered
//! ready; any failure here must prevent startup rather than leave a
//! partially populated catalog serving requests.

use crate::catalog::{ApiCatalog, CatalogError};
use crate::descriptor::CatalogEntry;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Why a catalog file could not be turned into a ready catalog.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read catalog file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse catalog file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog entry: {0}")]
    Catalog(#[from] CatalogError),
}

/// Load a catalog file and register every entry.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<ApiCatalog, IngestError> {
    let path = path.as_ref();
    let path_display = path.display().to_string();

    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path_display.clone(),
        source,
    })?;
    let reader = BufReader::new(file);
    let entries: Vec<CatalogEntry> =
        serde_json::from_reader(reader).map_err(|source| IngestError::Parse {
            path: path_display.clone(),
            source,
        })?;

    let catalog = build_catalog(entries)?;
    info!(path = %path_display, apis = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Register a batch of entries into a fresh catalog.
///
/// Exposed separately so tests and callers with in-memory catalogs do not
/// need to go through the filesystem.
pub fn build_catalog(entries: Vec<CatalogEntry>) -> Result<ApiCatalog, IngestError> {
    let mut catalog = ApiCatalog::new();
    for entry in entries {
        let (descriptor, keywords) = entry.into_parts();
        catalog.register(descriptor, keywords)?;
    }
    Ok(catalog)
}
