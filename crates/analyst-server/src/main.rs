//! fin-analyst HTTP Server
//!
//! Axum-based facade exposing the analyst tools over REST for the
//! external chat/agent layer. The process holds no per-request state:
//! every resolution is independent and every response carries its own
//! provenance tag.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use analyst_core::ToolRegistry;
use market_analyst::{
    tools::{EndpointStatusTool, ListChargesTool, PortfolioAnalysisTool, StockQuoteTool},
    AnalystConfig, ChargesClient, DiagnosticsReporter, FallbackResolver, HttpGateway,
    PortfolioAnalyzer, RemoteGateway,
};

use crate::handlers::{
    analyze_portfolio, call_tool, diagnostics_report, health_check, list_charges, list_tools,
    resolve_quote,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = AnalystConfig::from_env();
    tracing::info!(
        brokerage = %config.brokerage.url,
        payments = %config.payments.url,
        enabled = config.brokerage.enabled,
        "endpoint configuration loaded"
    );
    if !config.brokerage.enabled {
        tracing::warn!("remote endpoints disabled - every answer will come from fallback data");
    }

    // One gateway, one connection pool, shared by every component
    let gateway: Arc<dyn RemoteGateway> = Arc::new(HttpGateway::new());

    let resolver = Arc::new(FallbackResolver::new(
        gateway.clone(),
        config.brokerage.clone(),
    ));
    let analyzer = Arc::new(PortfolioAnalyzer::new(resolver.clone()));
    let charges = Arc::new(ChargesClient::new(gateway.clone(), config.payments.clone()));
    let diagnostics = Arc::new(DiagnosticsReporter::new(gateway, config.endpoints()));

    // Register the analyst tools for the external reasoning agent
    let mut tools = ToolRegistry::new();
    tools.register(StockQuoteTool::new(resolver.clone()));
    tools.register(PortfolioAnalysisTool::new(analyzer.clone()));
    tools.register(ListChargesTool::new(charges.clone()));
    tools.register(EndpointStatusTool::new(diagnostics.clone()));

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    let state = AppState {
        tools: Arc::new(tools),
        resolver,
        analyzer,
        charges,
        diagnostics,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/tools", get(list_tools))
        // Analyst API
        .route("/api/quote", post(resolve_quote))
        .route("/api/portfolio", post(analyze_portfolio))
        .route("/api/charges", post(list_charges))
        .route("/api/diagnostics", get(diagnostics_report))
        // Agent integration
        .route("/api/tools/call", post(call_tool))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("fin-analyst server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health           - Health check with endpoint probes");
    tracing::info!("  GET  /api/tools        - Tool schemas for the agent");
    tracing::info!("  POST /api/tools/call   - Generic tool dispatch");
    tracing::info!("  POST /api/quote        - Resolve a query to a quote");
    tracing::info!("  POST /api/portfolio    - Analyze a portfolio");
    tracing::info!("  POST /api/charges      - List recent payment charges");
    tracing::info!("  GET  /api/diagnostics  - Endpoint health report");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
