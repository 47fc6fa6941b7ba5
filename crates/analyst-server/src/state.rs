//! Shared Application State

use std::sync::Arc;

use analyst_core::ToolRegistry;
use market_analyst::{
    ChargesClient, DiagnosticsReporter, FallbackResolver, PortfolioAnalyzer,
};

#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<ToolRegistry>,
    pub resolver: Arc<FallbackResolver>,
    pub analyzer: Arc<PortfolioAnalyzer>,
    pub charges: Arc<ChargesClient>,
    pub diagnostics: Arc<DiagnosticsReporter>,
}
