//! Domain Models
//!
//! Core data types for quote resolution and portfolio analytics.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time market quote.
///
/// Immutable value type: produced fresh on every resolution and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Canonical instrument symbol (e.g. "RELIANCE", "AAPL")
    pub symbol: String,

    /// Last traded price
    pub price: Decimal,

    /// Absolute change since previous close
    pub change_absolute: Decimal,

    /// Percent change since previous close
    pub change_percent: Decimal,

    /// Traded volume
    pub volume: u64,

    /// Trading day the quote refers to
    pub as_of: NaiveDate,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change_absolute: Decimal::ZERO,
            change_percent: Decimal::ZERO,
            volume: 0,
            as_of: Utc::now().date_naive(),
        }
    }
}

/// Which data source ultimately answered a query.
///
/// Every numeric result handed to a caller carries one of these tags;
/// it is the only signal that degradation occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Remote endpoint answered with live data
    Live,
    /// Remote failed; answer came from the curated reference table
    FallbackKnown,
    /// Remote failed; answer was synthesized deterministically
    FallbackSynthetic,
}

impl Provenance {
    /// Human-readable source label for chat-facing output.
    pub fn label(self) -> &'static str {
        match self {
            Provenance::Live => "Live remote data",
            Provenance::FallbackKnown => "Reference data (remote unavailable)",
            Provenance::FallbackSynthetic => "Synthetic data (remote unavailable)",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of resolving a single free-form query to a quote.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// The query as the caller supplied it
    pub query: String,

    /// The resolved quote
    pub quote: Quote,

    /// Which source answered
    pub provenance: Provenance,

    /// Why the live source was bypassed, when it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl ResolutionResult {
    /// A result backed by the live remote endpoint.
    pub fn live(query: impl Into<String>, quote: Quote) -> Self {
        Self {
            query: query.into(),
            quote,
            provenance: Provenance::Live,
            fallback_reason: None,
        }
    }

    /// A degraded result with the reason the live source was bypassed.
    pub fn fallback(
        query: impl Into<String>,
        quote: Quote,
        provenance: Provenance,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            quote,
            provenance,
            fallback_reason: Some(reason.into()),
        }
    }
}

/// One line of a portfolio report.
///
/// `cost_basis` is a synthetic estimate derived from a stable hash of the
/// symbol, not real accounting data; it models an unknown historical
/// purchase price and is documented as such to consumers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HoldingReport {
    pub symbol: String,
    pub shares: i64,

    /// Resolved price per share
    pub price: Decimal,

    /// price * shares
    pub market_value: Decimal,

    /// Estimated purchase price per share
    pub cost_basis: Decimal,

    /// market_value - cost_basis * shares
    pub gain_loss: Decimal,

    /// Gain/loss relative to the invested estimate
    pub gain_loss_percent: Decimal,

    /// Share of total portfolio market value
    pub weight_percent: Decimal,

    /// Source of the price on this line
    pub provenance: Provenance,

    /// Source label for display
    pub data_source: String,

    /// Set when this line could not be priced; the rest of the report
    /// still proceeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Concentration classification of the largest position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcentrationRisk {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ConcentrationRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConcentrationRisk::Low => "Low",
            ConcentrationRisk::Medium => "Medium",
            ConcentrationRisk::High => "High",
        };
        f.write_str(s)
    }
}

/// Full portfolio analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Line items in the caller's input order
    pub holdings: Vec<HoldingReport>,

    /// Sum of per-line market values
    pub total_market_value: Decimal,

    /// Sum of per-line invested estimates
    pub total_invested: Decimal,

    /// total_market_value - total_invested
    pub total_gain_loss: Decimal,

    /// Return over the invested estimate, zero when nothing was invested
    pub total_return_percent: Decimal,

    /// Herfindahl-based spread metric, 0-100, higher is more diversified
    pub diversification_score: Decimal,

    /// Weight of the single largest position
    pub largest_position_weight_percent: Decimal,

    pub concentration_risk: ConcentrationRisk,

    /// Distinct source labels that contributed prices, in first-use order
    pub data_sources_used: Vec<String>,
}

/// A payment charge in minor currency units.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Charge {
    pub id: String,

    /// Amount in minor units (e.g. cents)
    pub amount: i64,

    pub currency: String,
    pub status: String,
    pub description: String,
    pub created: DateTime<Utc>,
}

/// An ordered charge listing with its source tag.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChargeListing {
    pub charges: Vec<Charge>,
    pub count: usize,

    /// Sum of charge amounts, minor units
    pub total_amount: i64,

    pub provenance: Provenance,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn resolution_result_constructors_set_provenance_once() {
        let quote = Quote::new("AAPL", dec!(182.52));

        let live = ResolutionResult::live("apple", quote.clone());
        assert_eq!(live.provenance, Provenance::Live);
        assert!(live.fallback_reason.is_none());

        let degraded = ResolutionResult::fallback(
            "apple",
            quote,
            Provenance::FallbackKnown,
            "authentication required",
        );
        assert_eq!(degraded.provenance, Provenance::FallbackKnown);
        assert!(degraded.fallback_reason.is_some());
    }

    #[test]
    fn provenance_serializes_snake_case() {
        let json = serde_json::to_string(&Provenance::FallbackSynthetic).unwrap();
        assert_eq!(json, "\"fallback_synthetic\"");
    }
}
