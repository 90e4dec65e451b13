//! Provider trait definition

use async_trait::async_trait;
use std::sync::Arc;

use super::error::ProviderResult;
use crate::types::{ChatMessage, ToolCall, ToolDeclaration};

/// One completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier as used by the provider's API
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// System instruction
    pub system: Option<String>,
    /// Conversation context, oldest first
    pub messages: Vec<ChatMessage>,
    /// Tools the model may request; empty means none are declared
    pub tools: Vec<ToolDeclaration>,
}

impl CompletionRequest {
    /// Create a request with no system instruction and no tools
    pub fn new(model: impl Into<String>, max_tokens: u32, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            system: None,
            messages,
            tools: Vec::new(),
        }
    }

    /// Set the system instruction
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set tools
    pub fn with_tools(mut self, tools: Vec<ToolDeclaration>) -> Self {
        self.tools = tools;
        self
    }
}

/// One unit of a completion response
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(String),
    ToolUse(ToolCall),
}

/// Ordered content blocks returned by the provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionResponse {
    pub blocks: Vec<ContentBlock>,
}

impl CompletionResponse {
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    /// A response made of text blocks only
    pub fn text<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blocks: texts.into_iter().map(|t| ContentBlock::Text(t.into())).collect(),
        }
    }

    /// Text blocks, in order
    pub fn texts(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text(text) => Some(text.as_str()),
                ContentBlock::ToolUse(_) => None,
            })
            .collect()
    }

    /// Tool-invocation requests, in order
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text(_) => None,
                ContentBlock::ToolUse(call) => Some(call),
            })
            .collect()
    }
}

/// Provider trait for LLM completion APIs
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn name(&self) -> &str;

    /// Run one non-streaming completion
    async fn complete(&self, request: CompletionRequest) -> ProviderResult<CompletionResponse>;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn complete(&self, request: CompletionRequest) -> ProviderResult<CompletionResponse> {
        (**self).complete(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partition_preserves_order() {
        let response = CompletionResponse::new(vec![
            ContentBlock::Text("Let me check.".to_string()),
            ContentBlock::ToolUse(ToolCall::new("t1", "get_forecast", json!({"latitude": 1}))),
            ContentBlock::Text("And alerts.".to_string()),
            ContentBlock::ToolUse(ToolCall::new("t2", "get_alerts", json!({"state": "MA"}))),
        ]);

        assert_eq!(response.texts(), vec!["Let me check.", "And alerts."]);
        let ids: Vec<&str> = response.tool_calls().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
    }

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("claude", 1000, vec![ChatMessage::user("hi")])
            .with_system("be brief");
        assert_eq!(request.system.as_deref(), Some("be brief"));
        assert!(request.tools.is_empty());
    }
}
