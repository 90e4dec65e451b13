//! MCP (Model Context Protocol) tool-host access
//!
//! Uses the official rmcp SDK to talk to a tool-host over a child process's
//! stdio or over streamable HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolbridge_core::mcp::{McpClient, ServerTarget, ToolHost};
//!
//! let target = ServerTarget::from_path("weather.py");
//! let client = McpClient::connect(&target, logger).await?;
//!
//! let tools = client.list_tools().await?;
//! let output = client.call_tool("get_forecast", json!({
//!     "latitude": 42.36,
//!     "longitude": -71.06
//! })).await?;
//! println!("{}", output.first_text());
//! ```

mod client;
mod host;
mod mock;

pub use client::{to_descriptor, to_output, McpClient, McpConnector, McpError, McpResult};
pub use host::{ServerTarget, ToolHost, ToolHostConnector};
pub use mock::{MockConnector, MockHostState, MockToolHost};
