//! Remote Data Gateway
//!
//! Abstractions over the remote JSON endpoints (brokerage quotes,
//! payments). One structured request per call, no retries; every
//! transport or protocol condition maps into a `GatewayOutcome` variant
//! that callers can recover from.

mod http;
mod scripted;

pub use http::HttpGateway;
pub use scripted::ScriptedGateway;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::EndpointConfig;

/// Classified result of one gateway call.
///
/// No variant is fatal: the resolver substitutes fallback data for
/// anything that is not `Success`.
#[derive(Clone, Debug)]
pub enum GatewayOutcome {
    /// Response carried the expected `result` payload
    Success(Value),
    /// HTTP 401/403 or a protocol-level auth error
    AuthRequired,
    /// HTTP 429 or an explicit rate-limit marker in the payload
    RateLimited,
    /// Connection refused, DNS failure, or timeout
    Unreachable(String),
    /// Response arrived but did not have the expected shape
    Malformed(String),
}

impl GatewayOutcome {
    /// Human-readable classification, used verbatim as the
    /// `fallback_reason` on degraded results.
    pub fn describe(&self) -> String {
        match self {
            GatewayOutcome::Success(_) => "live data".into(),
            GatewayOutcome::AuthRequired => "authentication required".into(),
            GatewayOutcome::RateLimited => "rate limited by endpoint".into(),
            GatewayOutcome::Unreachable(detail) => format!("endpoint unreachable ({detail})"),
            GatewayOutcome::Malformed(detail) => format!("malformed response ({detail})"),
        }
    }

    pub fn class(&self) -> OutcomeClass {
        match self {
            GatewayOutcome::Success(_) => OutcomeClass::Ok,
            GatewayOutcome::AuthRequired => OutcomeClass::AuthRequired,
            GatewayOutcome::RateLimited => OutcomeClass::RateLimited,
            GatewayOutcome::Unreachable(_) => OutcomeClass::Unreachable,
            GatewayOutcome::Malformed(_) => OutcomeClass::Malformed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GatewayOutcome::Success(_))
    }
}

/// Payload-free outcome classification for diagnostics reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeClass {
    Ok,
    AuthRequired,
    RateLimited,
    Unreachable,
    Malformed,
}

/// Gateway trait (Strategy pattern)
///
/// `HttpGateway` talks to real endpoints; `ScriptedGateway` replays
/// preset outcomes for demos and tests.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Issue one `{operation, arguments}` request against an endpoint
    /// and classify the outcome. Bounded by the endpoint's timeout.
    async fn fetch(
        &self,
        endpoint: &EndpointConfig,
        operation: &str,
        arguments: &Value,
    ) -> GatewayOutcome;
}
