//! Endpoint Configuration
//!
//! Explicit configuration structs passed into gateway and resolver
//! constructors at startup. No ambient globals: a process wires its
//! endpoints once and every component borrows from that.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One remote data endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Short name used in logs and diagnostics ("brokerage", "payments")
    pub name: String,

    /// Endpoint URL
    pub url: String,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,

    /// Disabled endpoints are never contacted; callers fall back
    pub enabled: bool,

    /// Bearer token attached to requests when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl EndpointConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout_secs,
            enabled: true,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Full analyst configuration: one endpoint per remote collaborator.
#[derive(Clone, Debug)]
pub struct AnalystConfig {
    /// Quote/brokerage data endpoint
    pub brokerage: EndpointConfig,

    /// Payments endpoint for charge listings
    pub payments: EndpointConfig,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            brokerage: EndpointConfig::new("brokerage", "https://mcp.kite.trade/mcp", 10),
            payments: EndpointConfig::new("payments", "http://localhost:3000", 15),
        }
    }
}

impl AnalystConfig {
    /// Read configuration from environment variables, falling back to
    /// the defaults above for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("BROKERAGE_MCP_URL") {
            config.brokerage.url = url;
        }
        if let Some(timeout) = env_u64("BROKERAGE_TIMEOUT_SECS") {
            config.brokerage.timeout_secs = timeout;
        }
        if let Ok(key) = std::env::var("BROKERAGE_API_KEY") {
            config.brokerage.api_key = Some(key);
        }

        if let Ok(url) = std::env::var("PAYMENTS_MCP_URL") {
            config.payments.url = url;
        }
        if let Some(timeout) = env_u64("PAYMENTS_TIMEOUT_SECS") {
            config.payments.timeout_secs = timeout;
        }
        if let Ok(key) = std::env::var("PAYMENTS_API_KEY") {
            config.payments.api_key = Some(key);
        }

        // One switch disables all remote calls; everything then answers
        // from fallback data, matching demo deployments.
        let enabled = std::env::var("MCP_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);
        config.brokerage.enabled = enabled;
        config.payments.enabled = enabled;

        config
    }

    pub fn endpoints(&self) -> Vec<EndpointConfig> {
        vec![self.brokerage.clone(), self.payments.clone()]
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
