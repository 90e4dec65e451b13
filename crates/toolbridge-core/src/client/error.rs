//! Client error types

use thiserror::Error;

use crate::mcp::McpError;
use crate::providers::ProviderError;

/// Everything that can go wrong behind the client's public surface
///
/// Never returned from `BridgeClient`'s public methods; each one is turned
/// into a failed `ClientResponse` (or, for cleanup, a log line).
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Not connected to MCP server")]
    NotConnected,

    /// Spawn, handshake or capability discovery failed
    #[error("{0}")]
    Connection(McpError),

    /// A tool call failed or faulted mid-query
    #[error("{0}")]
    Invocation(#[from] McpError),

    #[error("{0}")]
    Provider(#[from] ProviderError),
}

pub type ClientResult<T> = Result<T, ClientError>;
