//! Portfolio Analysis Tool
//!
//! Values a list of holdings and reports return, concentration, and
//! diversification metrics. Cost basis figures are synthetic estimates.

use std::sync::Arc;

use async_trait::async_trait;

use analyst_core::{
    tool::ParameterSchema, AgentError, Result as CoreResult, Tool, ToolCall, ToolResult,
    ToolSchema,
};

use crate::error::AnalystError;
use crate::portfolio::PortfolioAnalyzer;

pub struct PortfolioAnalysisTool {
    analyzer: Arc<PortfolioAnalyzer>,
}

impl PortfolioAnalysisTool {
    pub fn new(analyzer: Arc<PortfolioAnalyzer>) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl Tool for PortfolioAnalysisTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "portfolio_analysis".into(),
            description: "Analyze a stock portfolio: market value, estimated gain/loss, \
                          diversification score, and concentration risk. Symbols and share \
                          counts are parallel comma-separated lists. Cost basis is a \
                          synthetic estimate, not brokerage records."
                .into(),
            parameters: vec![
                ParameterSchema::required(
                    "symbols",
                    "string",
                    "Comma-separated symbols (e.g. 'AAPL,GOOGL,TCS')",
                ),
                ParameterSchema::required(
                    "shares",
                    "string",
                    "Comma-separated share counts matching the symbols (e.g. '10,5,20')",
                ),
            ],
            category: Some("analysis".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let symbols: Vec<String> = split_list(call.str_arg("symbols").unwrap_or_default());

        let mut shares = Vec::new();
        for token in split_list(call.str_arg("shares").unwrap_or_default()) {
            let count: i64 = token.parse().map_err(|_| {
                AgentError::ToolValidation(format!("share count '{token}' is not an integer"))
            })?;
            shares.push(count);
        }

        match self.analyzer.analyze(&symbols, &shares).await {
            Ok(report) => {
                let data = serde_json::to_value(&report)?;
                let output = serde_json::to_string_pretty(&report)?;
                Ok(ToolResult::success("portfolio_analysis", output).with_data(data))
            }
            Err(e @ AnalystError::ArityMismatch { .. }) => {
                Ok(ToolResult::failure("portfolio_analysis", e.to_string()))
            }
            Err(e) => Err(AgentError::ToolExecution(e.to_string())),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;
    use crate::gateway::ScriptedGateway;
    use crate::resolver::FallbackResolver;
    use std::collections::HashMap;

    fn tool(gateway: ScriptedGateway) -> PortfolioAnalysisTool {
        let resolver = Arc::new(FallbackResolver::new(
            Arc::new(gateway),
            EndpointConfig::new("brokerage", "http://localhost:0", 1),
        ));
        PortfolioAnalysisTool::new(Arc::new(PortfolioAnalyzer::new(resolver)))
    }

    fn call(symbols: &str, shares: &str) -> ToolCall {
        let mut args = HashMap::new();
        args.insert("symbols".to_string(), serde_json::json!(symbols));
        args.insert("shares".to_string(), serde_json::json!(shares));
        ToolCall::new("portfolio_analysis", args)
    }

    #[tokio::test]
    async fn analyzes_a_two_stock_portfolio() {
        let tool = tool(ScriptedGateway::unreachable("down"));
        let result = tool.execute(&call("reliance,tcs", "3, 2")).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("total_market_value"));
        assert!(result.output.contains("RELIANCE"));
    }

    #[tokio::test]
    async fn arity_mismatch_is_a_tool_failure_not_an_error() {
        let tool = tool(ScriptedGateway::unreachable("down"));
        let result = tool.execute(&call("AAPL,GOOGL", "10")).await.unwrap();

        assert!(!result.success);
        assert!(result.output.contains("must match"));
    }

    #[tokio::test]
    async fn non_numeric_share_count_fails_validation() {
        let tool = tool(ScriptedGateway::unreachable("down"));
        let err = tool.execute(&call("AAPL", "ten")).await.unwrap_err();

        assert!(matches!(err, AgentError::ToolValidation(_)));
    }
}
