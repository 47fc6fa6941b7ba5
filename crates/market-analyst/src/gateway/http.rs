//! HTTP Gateway
//!
//! `reqwest`-backed implementation of `RemoteGateway`. Issues one POST
//! per call with the endpoint's timeout and classifies the response.
//! Retry policy belongs to callers; none lives here.

use async_trait::async_trait;
use serde_json::Value;

use super::{GatewayOutcome, RemoteGateway};
use crate::config::EndpointConfig;

pub struct HttpGateway {
    client: reqwest::Client,
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpGateway {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Reuse an existing client (shared connection pool).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn fetch(
        &self,
        endpoint: &EndpointConfig,
        operation: &str,
        arguments: &Value,
    ) -> GatewayOutcome {
        if !endpoint.enabled {
            return GatewayOutcome::Unreachable("endpoint disabled in configuration".into());
        }

        let payload = serde_json::json!({
            "operation": operation,
            "arguments": arguments,
        });

        tracing::debug!(endpoint = %endpoint.name, %operation, "gateway request");

        let mut request = self
            .client
            .post(&endpoint.url)
            .timeout(endpoint.timeout())
            .json(&payload);

        if let Some(key) = &endpoint.api_key {
            request = request.bearer_auth(key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return GatewayOutcome::Unreachable(format!(
                    "timed out after {}s",
                    endpoint.timeout_secs
                ));
            }
            Err(e) if e.is_connect() => {
                return GatewayOutcome::Unreachable(format!("connection failed: {e}"));
            }
            Err(e) => {
                return GatewayOutcome::Unreachable(format!("transport error: {e}"));
            }
        };

        let status = response.status().as_u16();

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => return GatewayOutcome::Malformed(format!("invalid JSON body: {e}")),
        };

        let outcome = classify(status, &body);
        tracing::debug!(
            endpoint = %endpoint.name,
            %operation,
            class = ?outcome.class(),
            "gateway response"
        );
        outcome
    }
}

/// Map an HTTP status plus parsed body onto a gateway outcome.
///
/// Expected wire contract: success responses carry `{"result": ...}`,
/// errors carry `{"error": {"message", "code"}}`. Anything else is
/// `Malformed`.
fn classify(status: u16, body: &Value) -> GatewayOutcome {
    match status {
        401 | 403 => return GatewayOutcome::AuthRequired,
        429 => return GatewayOutcome::RateLimited,
        _ => {}
    }

    if let Some(error) = body.get("error") {
        let code = error.get("code").and_then(Value::as_i64);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");

        return match code {
            Some(401 | 403) => GatewayOutcome::AuthRequired,
            Some(429) => GatewayOutcome::RateLimited,
            _ => GatewayOutcome::Malformed(format!("endpoint error: {message}")),
        };
    }

    match body.get("result") {
        Some(result) => GatewayOutcome::Success(result.clone()),
        None => GatewayOutcome::Malformed(format!(
            "response missing result field (HTTP {status})"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_auth_statuses_classify_as_auth_required() {
        let body = serde_json::json!({});
        assert!(matches!(classify(401, &body), GatewayOutcome::AuthRequired));
        assert!(matches!(classify(403, &body), GatewayOutcome::AuthRequired));
    }

    #[test]
    fn http_429_classifies_as_rate_limited() {
        let body = serde_json::json!({});
        assert!(matches!(classify(429, &body), GatewayOutcome::RateLimited));
    }

    #[test]
    fn protocol_error_codes_override_http_200() {
        let auth = serde_json::json!({"error": {"message": "no token", "code": 401}});
        assert!(matches!(classify(200, &auth), GatewayOutcome::AuthRequired));

        let limited = serde_json::json!({"error": {"message": "slow down", "code": 429}});
        assert!(matches!(classify(200, &limited), GatewayOutcome::RateLimited));
    }

    #[test]
    fn other_protocol_errors_are_malformed() {
        let body = serde_json::json!({"error": {"message": "boom", "code": 500}});
        match classify(200, &body) {
            GatewayOutcome::Malformed(detail) => assert!(detail.contains("boom")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn result_payload_is_success() {
        let body = serde_json::json!({"result": {"symbol": "AAPL", "price": "182.52"}});
        match classify(200, &body) {
            GatewayOutcome::Success(payload) => {
                assert_eq!(payload["symbol"], "AAPL");
            }
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[test]
    fn missing_result_is_malformed() {
        let body = serde_json::json!({"data": []});
        assert!(matches!(classify(200, &body), GatewayOutcome::Malformed(_)));
    }
}
