//! Toolbridge Core
//!
//! A conversational client that lets a language model use the tools of an
//! MCP tool-host. The client connects to one tool-host, learns its tools,
//! keeps a bounded conversation window and runs each query through the model,
//! executing any tool calls the model asks for.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use toolbridge_core::{BridgeClient, ClientConfig, TracingLogger};
//!
//! let mut client = BridgeClient::new(&ClientConfig::default(), Arc::new(TracingLogger));
//! let connected = client.connect("weather.py").await;
//! println!("{}", connected.content());
//!
//! let response = client.process_query("Any weather alerts in CA?").await;
//! for call in response.tool_calls() {
//!     println!("[used {} with {}]", call.tool, call.args);
//! }
//! println!("{}", response.content());
//!
//! client.cleanup().await;
//! ```

pub mod types;
pub mod logging;
pub mod config;
pub mod providers;
pub mod mcp;
pub mod tools;
pub mod memory;
pub mod connection;
pub mod client;

// Re-export commonly used types
pub use types::{
    ChatMessage, ClientResponse, ContentPart, ConversationTurn, MessageContent, MessageRole,
    ToolCall, ToolDeclaration, ToolDescriptor, ToolInvocationRecord, ToolOutput,
};

pub use logging::{Logger, NoOpLogger, TracingLogger};

pub use config::{ClientConfig, ConfigError, FileConfigLoader};

pub use providers::{create_provider, CompletionRequest, CompletionResponse, Provider, ProviderError};

pub use mcp::{McpConnector, McpError, ServerTarget, ToolHost, ToolHostConnector};

pub use tools::CapabilityRegistry;

pub use memory::ConversationMemory;

pub use connection::{ConnectionManager, ConnectionSummary};

pub use client::{BridgeClient, ClientError};
