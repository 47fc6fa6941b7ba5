//! Scripted Gateway
//!
//! For testing and demo purposes. Replays preset outcomes instead of
//! touching the network, so fallback paths can be exercised on demand.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

use super::{GatewayOutcome, RemoteGateway};
use crate::config::EndpointConfig;

enum Script {
    /// Every call returns a clone of this outcome
    Fixed(GatewayOutcome),
    /// `get_quote` calls answer from this symbol -> price map; anything
    /// else is unreachable
    Quotes(HashMap<String, Decimal>),
}

pub struct ScriptedGateway {
    script: Script,
}

impl ScriptedGateway {
    /// Replay the same outcome for every call.
    pub fn always(outcome: GatewayOutcome) -> Self {
        Self {
            script: Script::Fixed(outcome),
        }
    }

    pub fn auth_required() -> Self {
        Self::always(GatewayOutcome::AuthRequired)
    }

    pub fn rate_limited() -> Self {
        Self::always(GatewayOutcome::RateLimited)
    }

    pub fn unreachable(detail: impl Into<String>) -> Self {
        Self::always(GatewayOutcome::Unreachable(detail.into()))
    }

    /// Serve live-shaped quote payloads for the given symbols.
    pub fn with_quotes<I, S>(quotes: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        Self {
            script: Script::Quotes(
                quotes
                    .into_iter()
                    .map(|(symbol, price)| (symbol.into().to_uppercase(), price))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl RemoteGateway for ScriptedGateway {
    async fn fetch(
        &self,
        _endpoint: &EndpointConfig,
        operation: &str,
        arguments: &Value,
    ) -> GatewayOutcome {
        match &self.script {
            Script::Fixed(outcome) => outcome.clone(),
            Script::Quotes(quotes) => {
                if operation != "get_quote" {
                    return GatewayOutcome::Unreachable("operation not scripted".into());
                }

                let query = arguments
                    .get("query")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .trim()
                    .to_uppercase();

                match quotes.get(&query) {
                    Some(price) => GatewayOutcome::Success(serde_json::json!({
                        "symbol": query,
                        "price": price.to_string(),
                        "change": "0",
                        "change_percent": "0",
                        "volume": 1_000_000u64,
                    })),
                    None => GatewayOutcome::Malformed(format!("no scripted quote for {query}")),
                }
            }
        }
    }
}
