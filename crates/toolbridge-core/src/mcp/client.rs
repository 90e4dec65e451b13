//! MCP client using the official rmcp SDK
//!
//! Talks to a tool-host over a child process's stdio or over streamable HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::{
    ServiceExt,
    model::{
        CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation,
        RawContent, Tool,
    },
    service::RunningService,
    transport::{ConfigureCommandExt, StreamableHttpClientTransport, TokioChildProcess},
    RoleClient,
};
use serde_json::Value;
use thiserror::Error;
use tokio::process::Command;

use super::host::{ServerTarget, ToolHost, ToolHostConnector};
use crate::logging::Logger;
use crate::types::{ToolDescriptor, ToolOutput, ToolOutputPart};

/// MCP client errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Tool call failed: {0}")]
    ToolCallFailed(String),

    #[error("Tool call '{tool}' timed out after {secs}s")]
    Timeout { tool: String, secs: u64 },

    #[error("Not connected to MCP server")]
    NotConnected,

    #[error("Protocol error: {0}")]
    Protocol(String),
}

pub type McpResult<T> = Result<T, McpError>;

fn client_info() -> ClientInfo {
    ClientInfo {
        meta: None,
        protocol_version: Default::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: "toolbridge-core".to_string(),
            title: Some("Toolbridge".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            website_url: None,
            icons: None,
        },
    }
}

/// Live session with one MCP tool-host
pub struct McpClient {
    /// The underlying rmcp running service; cancels itself when dropped
    client: RunningService<RoleClient, ClientInfo>,
    logger: Arc<dyn Logger>,
}

impl McpClient {
    /// Spawn a tool-host process and initialize a session over its stdio
    pub async fn spawn(
        command: &str,
        args: &[String],
        logger: Arc<dyn Logger>,
    ) -> McpResult<Self> {
        logger.info(&format!("[McpClient] Spawning tool-host: {} {:?}", command, args));

        let transport = TokioChildProcess::new(Command::new(command).configure(|cmd| {
            cmd.args(args);
        }))
        .map_err(|e| McpError::ConnectionFailed(format!("failed to spawn '{}': {}", command, e)))?;

        let client = client_info()
            .serve(transport)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        Ok(Self::initialized(client, logger))
    }

    /// Connect to an MCP server over HTTP (Streamable HTTP transport)
    pub async fn connect_http(url: &str, logger: Arc<dyn Logger>) -> McpResult<Self> {
        logger.info(&format!("[McpClient] Connecting to HTTP: {}", url));

        let transport = StreamableHttpClientTransport::from_uri(url);

        let client = client_info()
            .serve(transport)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        Ok(Self::initialized(client, logger))
    }

    fn initialized(client: RunningService<RoleClient, ClientInfo>, logger: Arc<dyn Logger>) -> Self {
        let session = Self { client, logger };
        session.logger.info(&format!(
            "[McpClient] Initialized session with {}",
            session.server_name().unwrap_or("unnamed server")
        ));
        session
    }

    /// Connect according to a [`ServerTarget`]
    pub async fn connect(target: &ServerTarget, logger: Arc<dyn Logger>) -> McpResult<Self> {
        match target {
            ServerTarget::Stdio { command, args } => Self::spawn(command, args, logger).await,
            ServerTarget::Http { url } => Self::connect_http(url, logger).await,
        }
    }

    /// Name the server reported during initialize
    pub fn server_name(&self) -> Option<&str> {
        self.client
            .peer_info()
            .map(|info| info.server_info.name.as_str())
    }
}

/// Convert an rmcp tool into our descriptor; a missing description becomes ""
pub fn to_descriptor(tool: Tool) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.name.to_string(),
        description: tool.description.map(|s| s.to_string()).unwrap_or_default(),
        input_schema: Value::Object(tool.input_schema.as_ref().clone()),
    }
}

/// Keep the text of text parts; other parts become text-less entries
pub fn to_output(result: CallToolResult) -> ToolOutput {
    let content = result
        .content
        .iter()
        .map(|c| match &c.raw {
            RawContent::Text(t) => ToolOutputPart {
                text: Some(t.text.clone()),
            },
            _ => ToolOutputPart { text: None },
        })
        .collect();

    ToolOutput {
        content,
        is_error: result.is_error.unwrap_or(false),
    }
}

#[async_trait]
impl ToolHost for McpClient {
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        let tools = self
            .client
            .list_all_tools()
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;

        self.logger.info(&format!("[McpClient] Listed {} tools", tools.len()));

        Ok(tools.into_iter().map(to_descriptor).collect())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<ToolOutput> {
        self.logger.info(&format!("[McpClient] Calling tool: {}", name));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: arguments.as_object().cloned(),
            task: None,
        };

        let result = self
            .client
            .call_tool(params)
            .await
            .map_err(|e| McpError::ToolCallFailed(e.to_string()))?;

        Ok(to_output(result))
    }

    async fn close(self: Box<Self>) -> McpResult<()> {
        self.logger.info("[McpClient] Closing connection");
        self.client
            .cancel()
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;
        Ok(())
    }
}

/// Connector that opens real rmcp sessions
pub struct McpConnector {
    logger: Arc<dyn Logger>,
}

impl McpConnector {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl ToolHostConnector for McpConnector {
    async fn connect(&self, target: &ServerTarget) -> McpResult<Box<dyn ToolHost>> {
        let client = McpClient::connect(target, Arc::clone(&self.logger)).await?;
        Ok(Box::new(client))
    }
}
