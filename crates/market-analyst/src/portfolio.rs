//! Portfolio Analyzer
//!
//! Values a set of holdings through the fallback resolver and computes
//! return, concentration, and diversification metrics. Cost basis is a
//! synthetic estimate (stable hash of the symbol), not accounting data.

use std::sync::Arc;

use futures::future;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{AnalystError, Result};
use crate::model::{ConcentrationRisk, HoldingReport, PortfolioReport, ResolutionResult};
use crate::resolver::FallbackResolver;
use crate::stable_hash::fnv1a64;

pub struct PortfolioAnalyzer {
    resolver: Arc<FallbackResolver>,
}

impl PortfolioAnalyzer {
    pub fn new(resolver: Arc<FallbackResolver>) -> Self {
        Self { resolver }
    }

    /// Analyze parallel symbol and share lists.
    ///
    /// Fails only on an arity mismatch between the two lists. Lines that
    /// cannot be priced (non-positive shares or price) carry an error
    /// marker and are excluded from the totals; the rest of the report
    /// proceeds.
    pub async fn analyze(&self, symbols: &[String], shares: &[i64]) -> Result<PortfolioReport> {
        if symbols.len() != shares.len() {
            return Err(AnalystError::ArityMismatch {
                symbols: symbols.len(),
                shares: shares.len(),
            });
        }

        // Per-holding resolutions are independent; issue them together.
        // join_all preserves input order for the report.
        let resolutions =
            future::join_all(symbols.iter().map(|symbol| self.resolver.resolve(symbol))).await;

        let mut holdings: Vec<HoldingReport> = resolutions
            .iter()
            .zip(shares)
            .map(|(resolution, &shares)| build_line(resolution, shares))
            .collect();

        let total_market_value: Decimal = holdings.iter().map(|h| h.market_value).sum();
        let total_invested: Decimal = holdings
            .iter()
            .map(|h| h.cost_basis * Decimal::from(h.shares.max(0)))
            .sum();

        // Weights as fractions of total market value; zero when the
        // portfolio is worthless.
        let mut largest_weight = Decimal::ZERO;
        let mut herfindahl = Decimal::ZERO;
        for holding in &mut holdings {
            let weight = if total_market_value > Decimal::ZERO {
                holding.market_value / total_market_value
            } else {
                Decimal::ZERO
            };
            holding.weight_percent = (weight * dec!(100)).round_dp(2);
            largest_weight = largest_weight.max(weight);
            herfindahl += weight * weight;
        }

        let total_gain_loss = total_market_value - total_invested;
        let total_return_percent = if total_invested > Decimal::ZERO {
            (total_gain_loss / total_invested * dec!(100)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        let diversification_score = ((Decimal::ONE - herfindahl) * dec!(100)).round_dp(2);

        let concentration_risk = if largest_weight > dec!(0.50) {
            ConcentrationRisk::High
        } else if largest_weight > dec!(0.25) {
            ConcentrationRisk::Medium
        } else {
            ConcentrationRisk::Low
        };

        let mut data_sources_used: Vec<String> = Vec::new();
        for resolution in &resolutions {
            let label = resolution.provenance.label().to_string();
            if !data_sources_used.contains(&label) {
                data_sources_used.push(label);
            }
        }

        Ok(PortfolioReport {
            holdings,
            total_market_value,
            total_invested,
            total_gain_loss,
            total_return_percent,
            diversification_score,
            largest_position_weight_percent: (largest_weight * dec!(100)).round_dp(2),
            concentration_risk,
            data_sources_used,
        })
    }
}

/// Build one report line from a resolution. Unpriceable lines contribute
/// zero to every total and record why.
fn build_line(resolution: &ResolutionResult, shares: i64) -> HoldingReport {
    let symbol = resolution.quote.symbol.clone();
    let provenance = resolution.provenance;
    let data_source = provenance.label().to_string();

    if shares <= 0 {
        return error_line(
            symbol,
            shares,
            provenance,
            data_source,
            format!("share count must be positive, got {shares}"),
        );
    }

    let price = resolution.quote.price;
    if price <= Decimal::ZERO {
        return error_line(
            symbol,
            shares,
            provenance,
            data_source,
            format!("resolved price is not usable: {price}"),
        );
    }

    let share_count = Decimal::from(shares);
    let market_value = price * share_count;
    let cost_basis = price * cost_basis_multiplier(&symbol);
    let invested = cost_basis * share_count;
    let gain_loss = market_value - invested;
    let gain_loss_percent = if invested > Decimal::ZERO {
        (gain_loss / invested * dec!(100)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    HoldingReport {
        symbol,
        shares,
        price,
        market_value,
        cost_basis,
        gain_loss,
        gain_loss_percent,
        weight_percent: Decimal::ZERO,
        provenance,
        data_source,
        error: None,
    }
}

fn error_line(
    symbol: String,
    shares: i64,
    provenance: crate::model::Provenance,
    data_source: String,
    error: String,
) -> HoldingReport {
    HoldingReport {
        symbol,
        shares,
        price: Decimal::ZERO,
        market_value: Decimal::ZERO,
        cost_basis: Decimal::ZERO,
        gain_loss: Decimal::ZERO,
        gain_loss_percent: Decimal::ZERO,
        weight_percent: Decimal::ZERO,
        provenance,
        data_source,
        error: Some(error),
    }
}

/// Deterministic purchase-price multiplier in [0.92, 1.08], modeling an
/// unknown historical cost basis.
fn cost_basis_multiplier(symbol: &str) -> Decimal {
    Decimal::from(92 + fnv1a64(symbol) % 17) / dec!(100)
}
