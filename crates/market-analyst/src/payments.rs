//! Payment Charge Listing
//!
//! Lists recent charges from the payments endpoint, substituting a
//! curated demo ledger when the endpoint is unavailable. Same contract
//! as quote resolution: never fails, provenance tells the caller which
//! data answered.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::Value;

use crate::config::EndpointConfig;
use crate::gateway::{GatewayOutcome, RemoteGateway};
use crate::model::{Charge, ChargeListing, Provenance};

pub struct ChargesClient {
    gateway: Arc<dyn RemoteGateway>,
    endpoint: EndpointConfig,
}

impl ChargesClient {
    pub fn new(gateway: Arc<dyn RemoteGateway>, endpoint: EndpointConfig) -> Self {
        Self { gateway, endpoint }
    }

    /// List the most recent charges, newest first. Never fails.
    pub async fn list_charges(&self, limit: usize) -> ChargeListing {
        let arguments = serde_json::json!({ "limit": limit });
        let outcome = self
            .gateway
            .fetch(&self.endpoint, "list_charges", &arguments)
            .await;

        let outcome = match outcome {
            GatewayOutcome::Success(payload) => match parse_charges(&payload) {
                Some(charges) => {
                    tracing::info!(count = charges.len(), "charges listed from live endpoint");
                    return listing(charges, limit, Provenance::Live, None);
                }
                None => GatewayOutcome::Malformed("charge payload missing charges array".into()),
            },
            other => other,
        };

        let reason = outcome.describe();
        tracing::info!(%reason, "charges listed from fallback ledger");
        listing(
            fallback_charges(),
            limit,
            Provenance::FallbackKnown,
            Some(reason),
        )
    }
}

fn listing(
    mut charges: Vec<Charge>,
    limit: usize,
    provenance: Provenance,
    fallback_reason: Option<String>,
) -> ChargeListing {
    charges.truncate(limit);
    let total_amount = charges.iter().map(|c| c.amount).sum();

    ChargeListing {
        count: charges.len(),
        total_amount,
        charges,
        provenance,
        fallback_reason,
    }
}

fn parse_charges(payload: &Value) -> Option<Vec<Charge>> {
    let entries = payload.get("charges")?.as_array()?;

    let mut charges = Vec::with_capacity(entries.len());
    for entry in entries {
        charges.push(Charge {
            id: entry.get("id")?.as_str()?.to_string(),
            amount: entry.get("amount")?.as_i64()?,
            currency: entry
                .get("currency")
                .and_then(Value::as_str)
                .unwrap_or("usd")
                .to_string(),
            status: entry
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            description: entry
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            created: entry
                .get("created")
                .and_then(Value::as_i64)
                .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
                .unwrap_or_else(Utc::now),
        });
    }

    Some(charges)
}

/// Curated demo ledger, newest first.
fn fallback_charges() -> Vec<Charge> {
    let now = Utc::now();
    vec![
        Charge {
            id: "ch_3Qf2p7K8Z5J1nB2z".into(),
            amount: 2500,
            currency: "usd".into(),
            status: "succeeded".into(),
            description: "Premium subscription - Monthly".into(),
            created: now - Duration::days(1),
        },
        Charge {
            id: "ch_3Qf1m8K8Z5J1nB3a".into(),
            amount: 5000,
            currency: "usd".into(),
            status: "succeeded".into(),
            description: "API usage fees".into(),
            created: now - Duration::days(2),
        },
        Charge {
            id: "ch_3Qe9p1K8Z5J1nB4b".into(),
            amount: 1500,
            currency: "usd".into(),
            status: "succeeded".into(),
            description: "Additional storage - 100GB".into(),
            created: now - Duration::days(3),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ScriptedGateway;

    fn client(gateway: ScriptedGateway) -> ChargesClient {
        ChargesClient::new(
            Arc::new(gateway),
            EndpointConfig::new("payments", "http://localhost:0", 1),
        )
    }

    #[tokio::test]
    async fn unreachable_endpoint_serves_fallback_ledger() {
        let client = client(ScriptedGateway::unreachable("connection refused"));
        let listing = client.list_charges(5).await;

        assert_eq!(listing.provenance, Provenance::FallbackKnown);
        assert_eq!(listing.count, 3);
        assert_eq!(listing.total_amount, 9000);
        assert!(listing.fallback_reason.is_some());
    }

    #[tokio::test]
    async fn limit_truncates_the_listing() {
        let client = client(ScriptedGateway::auth_required());
        let listing = client.list_charges(2).await;

        assert_eq!(listing.count, 2);
        assert_eq!(listing.charges.len(), 2);
        assert_eq!(listing.total_amount, 7500);
    }

    #[tokio::test]
    async fn live_payload_parses_into_charges() {
        let payload = serde_json::json!({
            "charges": [
                {
                    "id": "ch_live_1",
                    "amount": 1200,
                    "currency": "eur",
                    "status": "succeeded",
                    "description": "Invoice 42",
                    "created": 1_735_000_000i64,
                }
            ]
        });
        let client = client(ScriptedGateway::always(GatewayOutcome::Success(payload)));
        let listing = client.list_charges(5).await;

        assert_eq!(listing.provenance, Provenance::Live);
        assert_eq!(listing.count, 1);
        assert_eq!(listing.charges[0].currency, "eur");
        assert_eq!(listing.charges[0].amount, 1200);
        assert!(listing.fallback_reason.is_none());
    }

    #[tokio::test]
    async fn malformed_live_payload_falls_back() {
        let client = client(ScriptedGateway::always(GatewayOutcome::Success(
            serde_json::json!({"unexpected": true}),
        )));
        let listing = client.list_charges(5).await;

        assert_eq!(listing.provenance, Provenance::FallbackKnown);
        assert!(
            listing
                .fallback_reason
                .as_deref()
                .unwrap()
                .contains("malformed")
        );
    }
}
