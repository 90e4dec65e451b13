//! Connection manager
//!
//! Owns the single live tool-host session of a client together with the
//! capability cache filled on connect.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::logging::Logger;
use crate::mcp::{McpError, McpResult, ServerTarget, ToolHost, ToolHostConnector};
use crate::tools::CapabilityRegistry;
use crate::types::ToolOutput;

/// What a successful connect found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSummary {
    /// Short label of the server target
    pub target: String,
    /// Discovered tool names, in discovery order
    pub tools: Vec<String>,
}

impl ConnectionSummary {
    /// Human-readable summary naming the discovered tools
    pub fn message(&self) -> String {
        format!(
            "Connected successfully. Available tools: {}",
            self.tools.join(", ")
        )
    }
}

/// Owns the tool-host session and the capability registry
///
/// `is_connected()` is true only between a connect whose handshake and
/// capability fetch both succeeded and the next `cleanup()`.
pub struct ConnectionManager {
    connector: Box<dyn ToolHostConnector>,
    host: Option<Box<dyn ToolHost>>,
    connected: bool,
    registry: CapabilityRegistry,
    tool_timeout: Option<Duration>,
    logger: Arc<dyn Logger>,
}

impl ConnectionManager {
    pub fn new(connector: Box<dyn ToolHostConnector>, logger: Arc<dyn Logger>) -> Self {
        Self {
            connector,
            host: None,
            connected: false,
            registry: CapabilityRegistry::new(),
            tool_timeout: None,
            logger,
        }
    }

    /// Fail tool calls that take longer than `timeout`
    pub fn with_tool_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// Open a session, run the handshake and load the capability list
    ///
    /// An existing session is torn down first. On any failure the manager is
    /// left disconnected with an empty registry.
    pub async fn connect(&mut self, target: &ServerTarget) -> McpResult<ConnectionSummary> {
        if self.host.is_some() {
            self.logger
                .info("[ConnectionManager] Already connected, tearing down before reconnect");
            self.cleanup().await;
        }

        self.logger.info(&format!(
            "[ConnectionManager] Connecting to {}",
            target.describe()
        ));
        let host = self.connector.connect(target).await.map_err(|e| {
            self.logger
                .error(&format!("[ConnectionManager] Connect failed: {}", e));
            e
        })?;

        let tools = match host.list_tools().await {
            Ok(tools) => tools,
            Err(e) => {
                self.logger.error(&format!(
                    "[ConnectionManager] Capability discovery failed: {}",
                    e
                ));
                if let Err(close_err) = host.close().await {
                    self.logger.warn(&format!(
                        "[ConnectionManager] Failed to release transport: {}",
                        close_err
                    ));
                }
                return Err(e);
            }
        };

        let summary = ConnectionSummary {
            target: target.describe(),
            tools: tools.iter().map(|t| t.name.clone()).collect(),
        };
        self.registry.replace(tools);
        self.host = Some(host);
        self.connected = true;

        self.logger.info(&format!(
            "[ConnectionManager] Connected to {} with {} tools",
            summary.target,
            summary.tools.len()
        ));
        Ok(summary)
    }

    /// Send one `tools/call` and wait for its response
    pub async fn invoke(&self, tool_name: &str, args: Value) -> McpResult<ToolOutput> {
        let host = match &self.host {
            Some(host) if self.connected => host,
            _ => return Err(McpError::NotConnected),
        };

        self.logger.debug(&format!(
            "[ConnectionManager] Invoking {} with {}",
            tool_name, args
        ));

        let output = match self.tool_timeout {
            Some(limit) => tokio::time::timeout(limit, host.call_tool(tool_name, args))
                .await
                .map_err(|_| McpError::Timeout {
                    tool: tool_name.to_string(),
                    secs: limit.as_secs(),
                })??,
            None => host.call_tool(tool_name, args).await?,
        };

        if output.is_error {
            self.logger.warn(&format!(
                "[ConnectionManager] Tool {} reported an error result",
                tool_name
            ));
        }
        Ok(output)
    }

    pub fn is_connected(&self) -> bool {
        self.connected && self.host.is_some()
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Release the session and forget the capabilities
    ///
    /// Safe to call repeatedly and when never connected. Release failures are
    /// logged; the manager always ends up disconnected.
    pub async fn cleanup(&mut self) {
        self.connected = false;
        self.registry.clear();

        if let Some(host) = self.host.take() {
            match host.close().await {
                Ok(()) => self.logger.info("[ConnectionManager] Connection closed"),
                Err(e) => self.logger.warn(&format!(
                    "[ConnectionManager] Ignoring error while closing connection: {}",
                    e
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{NoOpLogger, RecordingLogger};
    use crate::mcp::MockConnector;
    use crate::types::ToolDescriptor;
    use serde_json::json;

    fn target() -> ServerTarget {
        ServerTarget::from_path("weather.py")
    }

    fn weather_connector() -> MockConnector {
        MockConnector::new()
            .with_tools(vec![
                ToolDescriptor::new("get_alerts", "Get weather alerts"),
                ToolDescriptor::new("get_forecast", "Get weather forecast"),
            ])
            .with_output("get_alerts", ToolOutput::text("No active alerts"))
    }

    fn manager(connector: &MockConnector) -> ConnectionManager {
        ConnectionManager::new(Box::new(connector.clone()), Arc::new(NoOpLogger))
    }

    #[tokio::test]
    async fn test_connect_populates_registry() {
        let connector = weather_connector();
        let mut manager = manager(&connector);
        assert!(!manager.is_connected());

        let summary = manager.connect(&target()).await.unwrap();
        assert!(manager.is_connected());
        assert_eq!(summary.tools, vec!["get_alerts", "get_forecast"]);
        assert_eq!(
            summary.message(),
            "Connected successfully. Available tools: get_alerts, get_forecast"
        );
        assert_eq!(manager.registry().len(), 2);
    }

    #[tokio::test]
    async fn test_summary_names_target() {
        let connector = weather_connector();
        let logger = Arc::new(RecordingLogger::new());
        let mut manager = ConnectionManager::new(Box::new(connector.clone()), logger.clone());

        let summary = manager.connect(&target()).await.unwrap();
        assert_eq!(summary.target, target().describe());
        assert!(logger.contains(
            "INFO",
            &format!("Connected to {} with 2 tools", target().describe())
        ));
    }

    #[tokio::test]
    async fn test_connect_failure_leaves_disconnected() {
        let connector = MockConnector::new().failing_connect("spawn failed");
        let mut manager = manager(&connector);

        let err = manager.connect(&target()).await.unwrap_err();
        assert!(err.to_string().contains("spawn failed"));
        assert!(!manager.is_connected());
        assert!(manager.registry().is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_releases_host() {
        let connector = weather_connector().failing_list("malformed tools/list");
        let mut manager = manager(&connector);

        assert!(manager.connect(&target()).await.is_err());
        assert!(!manager.is_connected());
        assert!(manager.registry().is_empty());
        assert_eq!(connector.state().closes(), 1);
    }

    #[tokio::test]
    async fn test_reconnect_tears_down_previous() {
        let connector = weather_connector();
        let mut manager = manager(&connector);

        manager.connect(&target()).await.unwrap();
        manager.connect(&target()).await.unwrap();

        let state = connector.state();
        assert_eq!(state.opened(), 2);
        assert_eq!(state.closes(), 1);
        assert!(manager.is_connected());
    }

    #[tokio::test]
    async fn test_invoke() {
        let connector = weather_connector();
        let mut manager = manager(&connector);

        let not_yet = manager.invoke("get_alerts", json!({"state": "MA"})).await;
        assert!(matches!(not_yet, Err(McpError::NotConnected)));

        manager.connect(&target()).await.unwrap();
        let output = manager.invoke("get_alerts", json!({"state": "MA"})).await.unwrap();
        assert_eq!(output.first_text(), "No active alerts");
        assert_eq!(
            connector.state().calls(),
            vec![("get_alerts".to_string(), json!({"state": "MA"}))]
        );
    }

    #[tokio::test]
    async fn test_invoke_deadline() {
        let connector = weather_connector().with_call_delay(Duration::from_millis(500));
        let mut manager = ConnectionManager::new(Box::new(connector.clone()), Arc::new(NoOpLogger))
            .with_tool_timeout(Some(Duration::from_millis(20)));

        manager.connect(&target()).await.unwrap();
        let err = manager.invoke("get_alerts", json!({"state": "MA"})).await.unwrap_err();
        assert!(matches!(err, McpError::Timeout { ref tool, .. } if tool == "get_alerts"));
    }

    #[tokio::test]
    async fn test_cleanup_is_idempotent() {
        let connector = weather_connector();
        let mut manager = manager(&connector);

        manager.cleanup().await;
        assert!(!manager.is_connected());

        manager.connect(&target()).await.unwrap();
        manager.cleanup().await;
        manager.cleanup().await;

        assert!(!manager.is_connected());
        assert!(manager.registry().is_empty());
        assert_eq!(connector.state().closes(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_swallows_close_error() {
        let connector = weather_connector().failing_close("broken pipe");
        let logger = Arc::new(RecordingLogger::new());
        let mut manager = ConnectionManager::new(Box::new(connector.clone()), logger.clone());

        manager.connect(&target()).await.unwrap();
        manager.cleanup().await;

        assert!(!manager.is_connected());
        assert!(logger.contains("WARN", "broken pipe"));
    }
}
