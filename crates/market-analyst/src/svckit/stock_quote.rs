//! Stock Quote Tool
//!
//! Resolves a company name or ticker to a quote, live when possible,
//! labeled fallback data otherwise.

use std::sync::Arc;

use async_trait::async_trait;

use analyst_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::resolver::FallbackResolver;

pub struct StockQuoteTool {
    resolver: Arc<FallbackResolver>,
}

impl StockQuoteTool {
    pub fn new(resolver: Arc<FallbackResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Tool for StockQuoteTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "stock_quote".into(),
            description: "Get the current quote for a company name or stock ticker \
                          (e.g. 'RELIANCE', 'Apple', 'NIFTY 50'). Always answers; the \
                          provenance field says whether the data is live or fallback."
                .into(),
            parameters: vec![ParameterSchema::required(
                "query",
                "string",
                "Company name or ticker symbol to look up",
            )],
            category: Some("market_data".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let query = call.str_arg("query").unwrap_or_default();

        let resolution = self.resolver.resolve(query).await;
        let data = serde_json::to_value(&resolution)?;
        let output = serde_json::to_string_pretty(&resolution)?;

        Ok(ToolResult::success("stock_quote", output).with_data(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;
    use crate::gateway::ScriptedGateway;
    use std::collections::HashMap;

    #[tokio::test]
    async fn tool_output_carries_symbol_and_provenance() {
        let resolver = Arc::new(FallbackResolver::new(
            Arc::new(ScriptedGateway::auth_required()),
            EndpointConfig::new("brokerage", "http://localhost:0", 1),
        ));
        let tool = StockQuoteTool::new(resolver);

        let mut args = HashMap::new();
        args.insert("query".to_string(), serde_json::json!("reliance"));
        let result = tool.execute(&ToolCall::new("stock_quote", args)).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("RELIANCE"));
        assert!(result.output.contains("fallback_known"));
        assert!(result.data.is_some());
    }
}
