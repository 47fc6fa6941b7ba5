//! Endpoint Status Tool
//!
//! Exposes the diagnostics reporter to the agent so it can explain why
//! answers are coming from fallback data.

use std::sync::Arc;

use async_trait::async_trait;

use analyst_core::{Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use crate::diagnostics::DiagnosticsReporter;

pub struct EndpointStatusTool {
    reporter: Arc<DiagnosticsReporter>,
}

impl EndpointStatusTool {
    pub fn new(reporter: Arc<DiagnosticsReporter>) -> Self {
        Self { reporter }
    }
}

#[async_trait]
impl Tool for EndpointStatusTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "endpoint_status".into(),
            description: "Check the health of the configured remote data endpoints and get \
                          remediation hints for anything unreachable or unauthenticated."
                .into(),
            parameters: vec![],
            category: Some("diagnostics".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<ToolResult> {
        let report = self.reporter.check_health().await;
        let data = serde_json::to_value(&report)?;
        let output = serde_json::to_string_pretty(&report)?;

        Ok(ToolResult::success("endpoint_status", output).with_data(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;
    use crate::gateway::ScriptedGateway;
    use std::collections::HashMap;

    #[tokio::test]
    async fn reports_every_configured_endpoint() {
        let reporter = Arc::new(DiagnosticsReporter::new(
            Arc::new(ScriptedGateway::unreachable("down")),
            vec![
                EndpointConfig::new("brokerage", "http://localhost:1", 1),
                EndpointConfig::new("payments", "http://localhost:2", 1),
            ],
        ));
        let tool = EndpointStatusTool::new(reporter);

        let result = tool
            .execute(&ToolCall::new("endpoint_status", HashMap::new()))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output.contains("brokerage"));
        assert!(result.output.contains("payments"));
        assert!(result.output.contains("unreachable"));
    }
}
