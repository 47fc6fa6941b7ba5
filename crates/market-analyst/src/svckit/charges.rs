//! Charge Listing Tool
//!
//! Lists recent payment charges for revenue questions.

use std::sync::Arc;

use async_trait::async_trait;

use analyst_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::payments::ChargesClient;

const DEFAULT_LIMIT: i64 = 5;

pub struct ListChargesTool {
    client: Arc<ChargesClient>,
}

impl ListChargesTool {
    pub fn new(client: Arc<ChargesClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListChargesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_charges".into(),
            description: "List the most recent payment charges (business revenue). \
                          Amounts are in minor currency units."
                .into(),
            parameters: vec![ParameterSchema::optional(
                "limit",
                "number",
                "How many charges to return",
                serde_json::json!(DEFAULT_LIMIT),
            )],
            category: Some("payments".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let limit = call
            .int_arg("limit")
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_LIMIT);

        let listing = self.client.list_charges(limit as usize).await;
        let data = serde_json::to_value(&listing)?;
        let output = serde_json::to_string_pretty(&listing)?;

        Ok(ToolResult::success("list_charges", output).with_data(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;
    use crate::gateway::ScriptedGateway;
    use std::collections::HashMap;

    #[tokio::test]
    async fn lists_fallback_charges_with_limit() {
        let client = Arc::new(ChargesClient::new(
            Arc::new(ScriptedGateway::unreachable("down")),
            EndpointConfig::new("payments", "http://localhost:0", 1),
        ));
        let tool = ListChargesTool::new(client);

        let mut args = HashMap::new();
        args.insert("limit".to_string(), serde_json::json!(2));
        let result = tool.execute(&ToolCall::new("list_charges", args)).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("fallback_known"));
        let data = result.data.unwrap();
        assert_eq!(data["count"], 2);
    }
}
