//! Shared configuration structures for Chronicle components.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the `chronicled` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// The chain name used to namespace the store's index patterns.
    /// Treated as an opaque string.
    pub chain: String,
    /// Document-store client settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Configuration for the document-store search client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store, e.g. `http://localhost:9200`.
    #[serde(default = "default_store_url")]
    pub url: String,
    /// Outbound HTTP timeout in seconds.
    #[serde(default = "default_store_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_store_url() -> String {
    "http://localhost:9200".to_string()
}
fn default_store_timeout_secs() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            timeout_secs: default_store_timeout_secs(),
        }
    }
}

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Socket address the gateway listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Maximum number of in-flight requests before load shedding.
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
    /// Per-request timeout in seconds, enforced by the transport layer.
    #[serde(default = "default_gateway_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_listen_addr() -> String {
    "127.0.0.1:7000".to_string()
}
fn default_concurrency_limit() -> usize {
    128
}
fn default_gateway_timeout_secs() -> u64 {
    2
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            concurrency_limit: default_concurrency_limit(),
            timeout_secs: default_gateway_timeout_secs(),
        }
    }
}
