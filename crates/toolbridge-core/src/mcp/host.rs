//! Tool-host seams
//!
//! `ToolHost` is one live session; `ToolHostConnector` opens sessions. The
//! connection manager only talks to these traits, so tests can swap in
//! [`super::MockConnector`].

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::McpResult;
use crate::types::{ToolDescriptor, ToolOutput};

/// Where the tool-host lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transport", rename_all = "lowercase")]
pub enum ServerTarget {
    /// Launch a process and speak MCP over its stdin/stdout
    Stdio {
        command: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
    },
    /// Streamable HTTP endpoint
    Http { url: String },
}

impl ServerTarget {
    /// Launch target for a server path
    ///
    /// `.py` scripts run under `python`, `.js` under `node`, and anything else
    /// is executed directly.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let display = path.to_string_lossy().to_string();
        let interpreter = match path.extension().and_then(|e| e.to_str()) {
            Some("py") => Some("python"),
            Some("js") | Some("mjs") => Some("node"),
            _ => None,
        };

        match interpreter {
            Some(interpreter) => ServerTarget::Stdio {
                command: interpreter.to_string(),
                args: vec![display],
            },
            None => ServerTarget::Stdio {
                command: display,
                args: Vec::new(),
            },
        }
    }

    /// Short label for logs and summaries
    pub fn describe(&self) -> String {
        match self {
            ServerTarget::Stdio { command, args } if args.is_empty() => command.clone(),
            ServerTarget::Stdio { command, args } => format!("{} {}", command, args.join(" ")),
            ServerTarget::Http { url } => url.clone(),
        }
    }
}

/// One initialized session with a tool-host
#[async_trait]
pub trait ToolHost: Send + Sync {
    /// Capability discovery (`tools/list`)
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>>;

    /// Tool invocation (`tools/call`); a JSON-RPC fault is an `Err`
    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<ToolOutput>;

    /// Release the transport
    async fn close(self: Box<Self>) -> McpResult<()>;
}

/// Opens sessions: spawn/dial plus the initialize handshake
#[async_trait]
pub trait ToolHostConnector: Send + Sync {
    async fn connect(&self, target: &ServerTarget) -> McpResult<Box<dyn ToolHost>>;
}
