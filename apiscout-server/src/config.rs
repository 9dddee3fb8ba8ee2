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
use apiscout_core::MatchPolicy;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Apiscout server configuration.
///
/// Priority when loading: CLI flags > environment > config file > defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: TransportConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Which transport serves MCP requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Newline-delimited JSON-RPC over stdin/stdout (the default; what
    /// desktop MCP clients spawn).
    Stdio,
    /// JSON-RPC over HTTP POST.
    Http,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransportConfig {
    /// Transport to serve on.
    #[serde(default = "default_transport")]
    pub transport: TransportKind,

    /// HTTP listen address (only used with the http transport).
    #[serde(default = "default_http_addr")]
    pub listen_addr: String,

    /// Enable CORS on the HTTP transport.
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Path to the JSON catalog file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,

    /// Keyword match policy.
    #[serde(default)]
    pub match_policy: MatchPolicy,
}

fn default_transport() -> TransportKind {
    TransportKind::Stdio
}

fn default_http_addr() -> String {
    "127.0.0.1:7450".to_string()
}

fn default_enable_cors() -> bool {
    true
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("apis.json")
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            listen_addr: default_http_addr(),
            enable_cors: default_enable_cors(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            match_policy: MatchPolicy::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: TransportConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with priority: env > file > defaults.
    ///
    /// Supported environment variables:
    /// - APISCOUT_CATALOG: catalog file path
    /// - APISCOUT_TRANSPORT: "stdio" or "http"
    /// - APISCOUT_HTTP_ADDR: HTTP listen address
    /// - APISCOUT_MATCH_POLICY: "substring" or "whole_word"
    pub fn load(config_file: Option<PathBuf>) -> Result<Self> {
        let mut config = if let Some(path) = config_file {
            if path.exists() {
                tracing::info!("Loading configuration from file: {:?}", path);
                Self::from_file(&path)?
            } else {
                tracing::warn!("Config file not found: {:?}, using defaults", path);
                Self::default()
            }
        } else {
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("APISCOUT_CATALOG") {
            self.catalog.path = PathBuf::from(path);
        }
        if let Ok(transport) = std::env::var("APISCOUT_TRANSPORT") {
            match transport.to_lowercase().as_str() {
                "stdio" => self.server.transport = TransportKind::Stdio,
                "http" => self.server.transport = TransportKind::Http,
                other => tracing::warn!("Ignoring unknown APISCOUT_TRANSPORT value: {}", other),
            }
        }
        if let Ok(addr) = std::env::var("APISCOUT_HTTP_ADDR") {
            self.server.listen_addr = addr;
        }
        if let Ok(policy) = std::env::var("APISCOUT_MATCH_POLICY") {
            match policy.to_lowercase().as_str() {
                "substring" => self.catalog.match_policy = MatchPolicy::Substring,
                "whole_word" => self.catalog.match_policy = MatchPolicy::WholeWord,
                other => tracing::warn!("Ignoring unknown APISCOUT_MATCH_POLICY value: {}", other),
            }
        }
    }

    /// Parse the listen address as a SocketAddr.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(self.server.listen_addr.parse()?)
    }

    /// Validate configuration before serving.
    pub fn validate(&self) -> Result<()> {
        if self.server.transport == TransportKind::Http {
            self.socket_addr()?;
        }
        if self.catalog.path.as_os_str().is_empty() {
            anyhow::bail!("Catalog path cannot be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ServerConfig::default();
        assert_eq!(config.server.transport, TransportKind::Stdio);
        assert_eq!(config.catalog.path, PathBuf::from("apis.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_toml_config() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            transport = "http"
            listen_addr = "0.0.0.0:9000"

            [catalog]
            path = "catalog/apis.json"
            match_policy = "whole_word"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.transport, TransportKind::Http);
        assert_eq!(config.server.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.catalog.match_policy, MatchPolicy::WholeWord);
    }

    #[test]
    fn http_transport_requires_parseable_addr() {
        let mut config = ServerConfig::default();
        config.server.transport = TransportKind::Http;
        config.server.listen_addr = "not an address".to_string();
        assert!(config.validate().is_err());
    }
}
