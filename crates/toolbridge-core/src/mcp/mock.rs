//! Mock tool-host for testing
//!
//! Scripted tool outputs and faults without spawning a process. The connector
//! and every host it opens share one [`MockHostState`], so tests can inspect
//! calls, connects and closes after handing the connector to a client.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::client::{McpError, McpResult};
use super::host::{ServerTarget, ToolHost, ToolHostConnector};
use crate::types::{ToolDescriptor, ToolOutput};

#[derive(Debug, Clone)]
enum Scripted {
    Output(ToolOutput),
    Fault(String),
}

/// Shared, inspectable state behind [`MockConnector`]
#[derive(Debug, Default)]
pub struct MockHostState {
    tools: Mutex<Vec<ToolDescriptor>>,
    responses: Mutex<HashMap<String, Scripted>>,
    connect_error: Mutex<Option<String>>,
    list_error: Mutex<Option<String>>,
    close_error: Mutex<Option<String>>,
    calls: Mutex<Vec<(String, Value)>>,
    targets: Mutex<Vec<ServerTarget>>,
    opened: Mutex<usize>,
    closes: Mutex<usize>,
    call_delay: Mutex<Option<Duration>>,
}

impl MockHostState {
    /// Every `(tool, arguments)` pair received, in order
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }

    /// Targets passed to successful and failed connects, in order
    pub fn targets(&self) -> Vec<ServerTarget> {
        self.targets.lock().clone()
    }

    /// Hosts handed out (connects that got past the handshake)
    pub fn opened(&self) -> usize {
        *self.opened.lock()
    }

    /// Number of `close` calls
    pub fn closes(&self) -> usize {
        *self.closes.lock()
    }
}

/// Connector producing [`MockToolHost`] sessions
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    state: Arc<MockHostState>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advertise these tools from `tools/list`
    pub fn with_tools(self, tools: Vec<ToolDescriptor>) -> Self {
        *self.state.tools.lock() = tools;
        self
    }

    /// Return `output` whenever `tool` is called
    pub fn with_output(self, tool: impl Into<String>, output: ToolOutput) -> Self {
        self.state
            .responses
            .lock()
            .insert(tool.into(), Scripted::Output(output));
        self
    }

    /// Fail calls to `tool` with a protocol fault
    pub fn with_fault(self, tool: impl Into<String>, message: impl Into<String>) -> Self {
        self.state
            .responses
            .lock()
            .insert(tool.into(), Scripted::Fault(message.into()));
        self
    }

    /// Fail the spawn/handshake step
    pub fn failing_connect(self, message: impl Into<String>) -> Self {
        *self.state.connect_error.lock() = Some(message.into());
        self
    }

    /// Fail capability discovery
    pub fn failing_list(self, message: impl Into<String>) -> Self {
        *self.state.list_error.lock() = Some(message.into());
        self
    }

    /// Sleep this long inside every tool call
    pub fn with_call_delay(self, delay: Duration) -> Self {
        *self.state.call_delay.lock() = Some(delay);
        self
    }

    /// Fail transport release
    pub fn failing_close(self, message: impl Into<String>) -> Self {
        *self.state.close_error.lock() = Some(message.into());
        self
    }

    pub fn state(&self) -> Arc<MockHostState> {
        Arc::clone(&self.state)
    }
}

#[async_trait]
impl ToolHostConnector for MockConnector {
    async fn connect(&self, target: &ServerTarget) -> McpResult<Box<dyn ToolHost>> {
        self.state.targets.lock().push(target.clone());
        if let Some(message) = self.state.connect_error.lock().clone() {
            return Err(McpError::ConnectionFailed(message));
        }
        *self.state.opened.lock() += 1;
        Ok(Box::new(MockToolHost {
            state: Arc::clone(&self.state),
        }))
    }
}

/// One scripted session
#[derive(Debug)]
pub struct MockToolHost {
    state: Arc<MockHostState>,
}

#[async_trait]
impl ToolHost for MockToolHost {
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        if let Some(message) = self.state.list_error.lock().clone() {
            return Err(McpError::Protocol(message));
        }
        Ok(self.state.tools.lock().clone())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<ToolOutput> {
        self.state
            .calls
            .lock()
            .push((name.to_string(), arguments));

        let delay = *self.state.call_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.state.responses.lock().get(name).cloned() {
            Some(Scripted::Output(output)) => Ok(output),
            Some(Scripted::Fault(message)) => Err(McpError::ToolCallFailed(message)),
            None => Err(McpError::ToolCallFailed(format!("Unknown tool: {}", name))),
        }
    }

    async fn close(self: Box<Self>) -> McpResult<()> {
        *self.state.closes.lock() += 1;
        match self.state.close_error.lock().clone() {
            Some(message) => Err(McpError::Protocol(message)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn target() -> ServerTarget {
        ServerTarget::from_path("weather.py")
    }

    #[tokio::test]
    async fn test_scripted_output_and_fault() {
        let connector = MockConnector::new()
            .with_output("get_forecast", ToolOutput::text("Sunny"))
            .with_fault("get_alerts", "NWS unavailable");
        let host = connector.connect(&target()).await.unwrap();

        let ok = host.call_tool("get_forecast", json!({"latitude": 42.36})).await.unwrap();
        assert_eq!(ok.first_text(), "Sunny");

        let err = host.call_tool("get_alerts", json!({"state": "MA"})).await;
        assert!(matches!(err, Err(McpError::ToolCallFailed(m)) if m == "NWS unavailable"));

        assert_eq!(connector.state().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_fault() {
        let connector = MockConnector::new();
        let host = connector.connect(&target()).await.unwrap();
        assert!(host.call_tool("missing", json!({})).await.is_err());
    }

    #[tokio::test]
    async fn test_connect_and_close_counts() {
        let connector = MockConnector::new();
        let host = connector.connect(&target()).await.unwrap();
        host.close().await.unwrap();

        let state = connector.state();
        assert_eq!(state.opened(), 1);
        assert_eq!(state.closes(), 1);
    }
}
