//! Diagnostics Reporter
//!
//! Probes each configured endpoint with a single handshake request and
//! reports reachability plus remediation hints. Reports are rebuilt on
//! every call; nothing is cached.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::EndpointConfig;
use crate::gateway::{OutcomeClass, RemoteGateway};

/// Health snapshot for one endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndpointHealth {
    pub endpoint: String,
    pub url: String,
    pub reachable: bool,
    pub classification: OutcomeClass,
    pub remediation_hints: Vec<String>,
}

pub struct DiagnosticsReporter {
    gateway: Arc<dyn RemoteGateway>,
    endpoints: Vec<EndpointConfig>,
}

impl DiagnosticsReporter {
    pub fn new(gateway: Arc<dyn RemoteGateway>, endpoints: Vec<EndpointConfig>) -> Self {
        Self { gateway, endpoints }
    }

    /// Probe every configured endpoint once. Total function; each probe
    /// is bounded by that endpoint's timeout.
    pub async fn check_health(&self) -> Vec<EndpointHealth> {
        let mut report = Vec::with_capacity(self.endpoints.len());

        for endpoint in &self.endpoints {
            let arguments = serde_json::json!({
                "client": "fin-analyst",
                "version": env!("CARGO_PKG_VERSION"),
            });
            let outcome = self.gateway.fetch(endpoint, "handshake", &arguments).await;
            let classification = outcome.class();

            tracing::info!(
                endpoint = %endpoint.name,
                ?classification,
                "endpoint health probe"
            );

            report.push(EndpointHealth {
                endpoint: endpoint.name.clone(),
                url: endpoint.url.clone(),
                reachable: classification == OutcomeClass::Ok,
                classification,
                remediation_hints: remediation_hints(classification, &endpoint.name),
            });
        }

        report
    }
}

/// Fixed remediation hints keyed by outcome classification.
fn remediation_hints(classification: OutcomeClass, endpoint: &str) -> Vec<String> {
    match classification {
        OutcomeClass::Ok => Vec::new(),
        OutcomeClass::AuthRequired => vec![
            format!("configure API credentials for the {endpoint} endpoint"),
            "verify the credentials have not expired".into(),
        ],
        OutcomeClass::RateLimited => vec![
            "reduce request rate".into(),
            "wait before retrying".into(),
        ],
        OutcomeClass::Unreachable => vec![
            format!("start the local {endpoint} service if it should be running"),
            "check network connectivity".into(),
        ],
        OutcomeClass::Malformed => vec![
            format!("verify the {endpoint} endpoint speaks the expected protocol"),
            "check the endpoint URL points at the right service".into(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{GatewayOutcome, ScriptedGateway};

    fn endpoints() -> Vec<EndpointConfig> {
        vec![
            EndpointConfig::new("brokerage", "http://localhost:1", 1),
            EndpointConfig::new("payments", "http://localhost:2", 1),
        ]
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_hints() {
        let reporter = DiagnosticsReporter::new(
            Arc::new(ScriptedGateway::unreachable("connection refused")),
            endpoints(),
        );

        let report = reporter.check_health().await;
        assert_eq!(report.len(), 2);
        for health in &report {
            assert!(!health.reachable);
            assert_eq!(health.classification, OutcomeClass::Unreachable);
            assert!(!health.remediation_hints.is_empty());
        }
    }

    #[tokio::test]
    async fn auth_failure_suggests_credentials() {
        let reporter =
            DiagnosticsReporter::new(Arc::new(ScriptedGateway::auth_required()), endpoints());

        let report = reporter.check_health().await;
        assert!(report[0].remediation_hints[0].contains("credentials"));
        assert_eq!(report[0].classification, OutcomeClass::AuthRequired);
    }

    #[tokio::test]
    async fn healthy_endpoint_needs_no_hints() {
        let reporter = DiagnosticsReporter::new(
            Arc::new(ScriptedGateway::always(GatewayOutcome::Success(
                serde_json::json!({"status": "ok"}),
            ))),
            endpoints(),
        );

        let report = reporter.check_health().await;
        assert!(report[0].reachable);
        assert!(report[0].remediation_hints.is_empty());
    }

    #[tokio::test]
    async fn report_preserves_endpoint_order() {
        let reporter = DiagnosticsReporter::new(
            Arc::new(ScriptedGateway::unreachable("down")),
            endpoints(),
        );

        let report = reporter.check_health().await;
        assert_eq!(report[0].endpoint, "brokerage");
        assert_eq!(report[1].endpoint, "payments");
    }
}
