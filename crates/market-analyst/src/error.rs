//! Error Types for the Market Analyst

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalystError>;

/// Caller-visible errors.
///
/// Transport and protocol failures are deliberately absent: the resolver
/// absorbs every `GatewayOutcome` into labeled fallback data, so the only
/// errors that escape are caller input mistakes and serialization issues.
#[derive(Error, Debug)]
pub enum AnalystError {
    #[error("symbol and share lists must match: {symbols} symbols, {shares} share counts")]
    ArityMismatch { symbols: usize, shares: usize },

    #[error("could not interpret numeric value: {0}")]
    NumericConversion(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
