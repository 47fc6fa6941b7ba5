//! Service Kit - Agent Tools
//!
//! Domain-specific tools that implement `analyst_core::Tool` for the
//! financial analyst agent.

mod charges;
mod endpoint_status;
mod portfolio_analysis;
mod stock_quote;

pub use charges::ListChargesTool;
pub use endpoint_status::EndpointStatusTool;
pub use portfolio_analysis::PortfolioAnalysisTool;
pub use stock_quote::StockQuoteTool;
