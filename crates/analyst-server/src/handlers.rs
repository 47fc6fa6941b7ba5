//! HTTP Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use analyst_core::{AgentError, ToolCall, ToolResult, ToolSchema};
use market_analyst::{EndpointHealth, PortfolioReport, ResolutionResult};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointHealth>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct PortfolioRequest {
    pub symbols: Vec<String>,
    pub shares: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ChargesRequest {
    #[serde(default = "default_charge_limit")]
    pub limit: usize,
}

fn default_charge_limit() -> usize {
    5
}

#[derive(Debug, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: impl Into<String>, code: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check: probes every configured endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let endpoints = state.diagnostics.check_health().await;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    })
}

/// Resolve one query to a quote. Always succeeds; the provenance field
/// says which source answered.
pub async fn resolve_quote(
    State(state): State<AppState>,
    Json(payload): Json<QuoteRequest>,
) -> Json<ResolutionResult> {
    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, query = %payload.query, "quote request");

    Json(state.resolver.resolve(&payload.query).await)
}

/// Analyze a portfolio of (symbol, shares) pairs.
pub async fn analyze_portfolio(
    State(state): State<AppState>,
    Json(payload): Json<PortfolioRequest>,
) -> Result<Json<PortfolioReport>, HandlerError> {
    let report = state
        .analyzer
        .analyze(&payload.symbols, &payload.shares)
        .await
        .map_err(|e| bad_request(e.to_string(), "INVALID_PORTFOLIO"))?;

    Ok(Json(report))
}

/// List recent payment charges.
pub async fn list_charges(
    State(state): State<AppState>,
    Json(payload): Json<ChargesRequest>,
) -> Json<market_analyst::ChargeListing> {
    Json(state.charges.list_charges(payload.limit).await)
}

/// Full endpoint diagnostics report.
pub async fn diagnostics_report(State(state): State<AppState>) -> Json<Vec<EndpointHealth>> {
    Json(state.diagnostics.check_health().await)
}

/// List tool schemas for the external reasoning agent.
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolSchema>> {
    Json(state.tools.schemas())
}

/// Generic tool dispatch: the integration point for the external agent.
pub async fn call_tool(
    State(state): State<AppState>,
    Json(payload): Json<ToolCallRequest>,
) -> Result<Json<ToolResult>, HandlerError> {
    let call = ToolCall::new(payload.name, payload.arguments);

    let result = state.tools.execute(&call).await.map_err(|e| match e {
        AgentError::ToolNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.user_message(),
                code: "TOOL_NOT_FOUND".into(),
            }),
        ),
        AgentError::ToolValidation(_) => bad_request(e.user_message(), "INVALID_TOOL_INPUT"),
        other => {
            tracing::error!("tool execution error: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: other.user_message(),
                    code: "TOOL_ERROR".into(),
                }),
            )
        }
    })?;

    Ok(Json(result))
}
