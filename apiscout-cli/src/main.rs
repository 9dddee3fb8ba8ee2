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

//! Apiscout CLI
//!
//! Offline catalog operations: search, list, and validate a catalog file
//! without standing up the MCP server.

use anyhow::{Context, Result};
use apiscout_core::{load_catalog, ApiEnvelope, ApiFinder, MatchPolicy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "apiscout")]
#[command(about = "Apiscout - intent-to-API catalog lookup", long_about = None)]
struct Cli {
    /// Catalog file
    #[arg(short, long, default_value = "apis.json", env = "APISCOUT_CATALOG")]
    catalog: PathBuf,

    /// Match whole words only instead of substrings
    #[arg(long)]
    whole_word: bool,

    /// Output as JSON (machine-readable)
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog with a free-text intent
    Search {
        /// The intent text
        intent: String,
    },

    /// List every registered API
    List,

    /// Check that the catalog file loads cleanly
    Validate,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let catalog = load_catalog(&cli.catalog)
        .with_context(|| format!("failed to load catalog from {:?}", cli.catalog))?;

    let policy = if cli.whole_word {
        MatchPolicy::WholeWord
    } else {
        MatchPolicy::Substring
    };
    let finder = ApiFinder::new(Arc::new(catalog), policy);

    match cli.command {
        Commands::Search { intent } => {
            let apis = finder.search_by_intent(&intent);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ApiEnvelope { apis })?);
            } else if apis.is_empty() {
                println!("No APIs matched.");
            } else {
                for api in apis {
                    println!("{}  {} {}", api.name, api.method, api.endpoint);
                    println!("    {}", api.description);
                }
            }
        }
        Commands::List => {
            let apis = finder.list_all();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ApiEnvelope { apis })?);
            } else if apis.is_empty() {
                println!("No APIs are registered.");
            } else {
                for api in apis {
                    println!("{}  {}", api.name, api.description);
                }
            }
        }
        Commands::Validate => {
            // load_catalog already failed loudly if the file was bad.
            println!("OK: {} APIs registered", finder.catalog_len());
        }
    }

    Ok(())
}
