//! # market-analyst
//!
//! Quote resolution with live-to-synthetic fallback, portfolio
//! analytics, and endpoint diagnostics for a chat-driven financial
//! analyst agent.
//!
//! ## Data flow
//!
//! ```text
//! agent / UI
//!     │
//!     ▼
//! FallbackResolver ──── PortfolioAnalyzer (one resolution per holding)
//!     │
//!     ▼
//! RemoteGateway (one request, one timeout, classified outcome)
//!     │ non-success
//!     ▼
//! refdata::normalize (curated table, then deterministic synthesis)
//!     │
//!     ▼
//! ResolutionResult { quote, provenance, fallback_reason }
//! ```
//!
//! The contract every caller relies on: resolution never fails and never
//! blocks past the endpoint timeout. Degradation swaps live data for
//! labeled reference or synthetic data; the `provenance` tag is the only
//! visible difference.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gateway;
pub mod model;
pub mod payments;
pub mod portfolio;
pub mod refdata;
pub mod resolver;
mod stable_hash;
pub mod svckit;

pub use config::{AnalystConfig, EndpointConfig};
pub use diagnostics::{DiagnosticsReporter, EndpointHealth};
pub use error::{AnalystError, Result};
pub use gateway::{GatewayOutcome, HttpGateway, OutcomeClass, RemoteGateway, ScriptedGateway};
pub use model::{
    Charge, ChargeListing, ConcentrationRisk, HoldingReport, PortfolioReport, Provenance, Quote,
    ResolutionResult,
};
pub use payments::ChargesClient;
pub use portfolio::PortfolioAnalyzer;
pub use resolver::FallbackResolver;

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        EndpointStatusTool, ListChargesTool, PortfolioAnalysisTool, StockQuoteTool,
    };
}

/// System prompt for the financial analyst agent
pub const FINANCIAL_ANALYST_PROMPT: &str = r#"You are a financial analyst assistant. Answer user questions with the tools you have access to; never invent market data yourself.

## Workflow

1. For a stock price or company question, call `stock_quote`.
2. For business revenue or recent payment questions, call `list_charges`.
3. For portfolio questions ("I own 10 AAPL and 5 GOOGL"), call `portfolio_analysis` with parallel symbol and share lists.
4. If data looks degraded or a user asks why, call `endpoint_status` and relay the remediation hints.

## Presenting results

- Every tool answer includes a `provenance` field. Present live data as current market data. Present fallback data normally but mention the source annotation; never claim you were unable to retrieve data when a tool returned fallback values.
- Portfolio cost basis and gain/loss figures are synthetic estimates, not brokerage records. Say so when presenting them.
- Format prices with their currency and include the day's change when available."#;
