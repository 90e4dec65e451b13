//! Core types shared by the provider, tool-host and client layers

mod message;
mod response;
mod tool;

pub use message::{ChatMessage, ContentPart, ConversationTurn, MessageContent, MessageRole};
pub use response::ClientResponse;
pub use tool::{
    ToolCall, ToolDeclaration, ToolDescriptor, ToolInvocationRecord, ToolOutput, ToolOutputPart,
    NO_RESULT,
};
