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

use anyhow::Result;
use apiscout_server::config::{ServerConfig, TransportKind};
use apiscout_server::run_server;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog file path (overrides config file)
    #[arg(long, env = "APISCOUT_CATALOG")]
    catalog: Option<PathBuf>,

    /// HTTP listen address (overrides config file)
    #[arg(long, env = "APISCOUT_HTTP_ADDR")]
    http_addr: Option<String>,

    /// Serve over HTTP instead of stdio
    #[arg(long)]
    http: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::load(args.config)?;

    // Apply CLI overrides
    if let Some(catalog) = args.catalog {
        config.catalog.path = catalog;
    }
    if let Some(addr) = args.http_addr {
        config.server.listen_addr = addr;
    }
    if args.http {
        config.server.transport = TransportKind::Http;
    }

    run_server(config).await
}
