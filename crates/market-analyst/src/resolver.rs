//! Fallback Resolver
//!
//! Orchestrates the gateway and the normalizer. The caller-visible
//! contract is "always returns usable data": live quotes when the remote
//! endpoint answers, labeled reference or synthetic data when it does
//! not. The provenance tag and fallback reason are the only signals that
//! degradation occurred; the response shape never changes.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::config::EndpointConfig;
use crate::gateway::{GatewayOutcome, RemoteGateway};
use crate::model::{Provenance, Quote, ResolutionResult};
use crate::refdata;

pub struct FallbackResolver {
    gateway: Arc<dyn RemoteGateway>,
    endpoint: EndpointConfig,
}

impl FallbackResolver {
    pub fn new(gateway: Arc<dyn RemoteGateway>, endpoint: EndpointConfig) -> Self {
        Self { gateway, endpoint }
    }

    /// Resolve a free-form query to a quote. Never fails; bounded by the
    /// endpoint timeout plus pure normalization.
    pub async fn resolve(&self, query: &str) -> ResolutionResult {
        let arguments = serde_json::json!({ "query": query });
        let outcome = self
            .gateway
            .fetch(&self.endpoint, "get_quote", &arguments)
            .await;

        let outcome = match outcome {
            GatewayOutcome::Success(payload) => match parse_quote(&payload, query) {
                Some(quote) => {
                    tracing::info!(%query, symbol = %quote.symbol, "resolved from live endpoint");
                    return ResolutionResult::live(query, quote);
                }
                // A payload we cannot price is no better than a bad
                // response; downgrade and fall back.
                None => GatewayOutcome::Malformed("quote payload missing usable price".into()),
            },
            other => other,
        };

        let reason = outcome.describe();
        let normalized = refdata::normalize(query);
        let provenance = if normalized.kind.is_reference() {
            Provenance::FallbackKnown
        } else {
            Provenance::FallbackSynthetic
        };

        tracing::info!(%query, %reason, ?provenance, "resolved from fallback data");
        ResolutionResult::fallback(query, normalized.quote, provenance, reason)
    }
}

/// Extract a quote from a live `result` payload.
///
/// Remote sources format prices inconsistently (numbers, or strings like
/// "2,847.65" and "+12.30"); all of those parse. Returns `None` when no
/// usable price is present.
fn parse_quote(payload: &Value, query: &str) -> Option<Quote> {
    let symbol = payload
        .get("symbol")
        .and_then(Value::as_str)
        .map_or_else(|| query.trim().to_uppercase(), str::to_string);

    let price = parse_decimal(payload.get("price")?)?;
    if price <= Decimal::ZERO {
        return None;
    }

    let change_absolute = payload
        .get("change")
        .and_then(parse_decimal)
        .unwrap_or(Decimal::ZERO);
    let change_percent = payload
        .get("change_percent")
        .and_then(parse_decimal)
        .unwrap_or(Decimal::ZERO);
    let volume = payload.get("volume").and_then(parse_volume).unwrap_or(0);

    Some(Quote {
        symbol,
        price,
        change_absolute,
        change_percent,
        volume,
        as_of: Utc::now().date_naive(),
    })
}

fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(Decimal::from_f64_retain)
            .or_else(|| n.as_i64().map(Decimal::from)),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !matches!(c, ',' | '$' | '%' | '+' | ' '))
                .collect();
            cleaned.parse().ok()
        }
        _ => None,
    }
}

fn parse_volume(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.replace(',', "").parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ScriptedGateway;
    use rust_decimal_macros::dec;

    fn resolver(gateway: ScriptedGateway) -> FallbackResolver {
        FallbackResolver::new(
            Arc::new(gateway),
            EndpointConfig::new("brokerage", "http://localhost:0", 1),
        )
    }

    #[tokio::test]
    async fn live_success_keeps_live_provenance() {
        let resolver = resolver(ScriptedGateway::with_quotes([("AAPL", dec!(182.52))]));
        let result = resolver.resolve("AAPL").await;

        assert_eq!(result.provenance, Provenance::Live);
        assert_eq!(result.quote.price, dec!(182.52));
        assert!(result.fallback_reason.is_none());
    }

    #[tokio::test]
    async fn auth_failure_falls_back_to_reference_data() {
        let resolver = resolver(ScriptedGateway::auth_required());
        let result = resolver.resolve("RELIANCE").await;

        assert_eq!(result.provenance, Provenance::FallbackKnown);
        assert_eq!(result.quote.symbol, "RELIANCE");
        assert_eq!(result.quote.price, dec!(2847.65));
        assert!(
            result
                .fallback_reason
                .as_deref()
                .unwrap()
                .contains("authentication")
        );
    }

    #[tokio::test]
    async fn unreachable_unknown_ticker_synthesizes_reproducibly() {
        let resolver = resolver(ScriptedGateway::unreachable("connection refused"));

        let first = resolver.resolve("ZXQ9").await;
        let second = resolver.resolve("ZXQ9").await;

        assert_eq!(first.provenance, Provenance::FallbackSynthetic);
        assert_eq!(first.quote.price, second.quote.price);
        assert!(
            first
                .fallback_reason
                .as_deref()
                .unwrap()
                .contains("unreachable")
        );
    }

    #[tokio::test]
    async fn rate_limit_reason_reaches_the_caller() {
        let resolver = resolver(ScriptedGateway::rate_limited());
        let result = resolver.resolve("tcs").await;

        assert_eq!(result.provenance, Provenance::FallbackKnown);
        assert!(
            result
                .fallback_reason
                .as_deref()
                .unwrap()
                .contains("rate limited")
        );
    }

    #[tokio::test]
    async fn unpriceable_live_payload_degrades_to_fallback() {
        let gateway = ScriptedGateway::always(GatewayOutcome::Success(
            serde_json::json!({"symbol": "TCS"}),
        ));
        let resolver = resolver(gateway);
        let result = resolver.resolve("tcs").await;

        assert_eq!(result.provenance, Provenance::FallbackKnown);
        assert!(
            result
                .fallback_reason
                .as_deref()
                .unwrap()
                .contains("malformed")
        );
    }

    #[test]
    fn parse_decimal_handles_grouped_strings() {
        assert_eq!(
            parse_decimal(&serde_json::json!("2,847.65")),
            Some(dec!(2847.65))
        );
        assert_eq!(parse_decimal(&serde_json::json!("+12.30")), Some(dec!(12.30)));
        assert_eq!(parse_decimal(&serde_json::json!("+0.43%")), Some(dec!(0.43)));
        assert_eq!(parse_decimal(&serde_json::json!(182.5)), Some(dec!(182.5)));
        assert_eq!(parse_decimal(&serde_json::json!(null)), None);
    }
}
