//! BridgeClient - the query orchestrator
//!
//! Drives one query through the language model and the connected tool-host:
//! a first completion that may request tools, the tool calls themselves, and
//! a single follow-up completion carrying their results.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::connection::ConnectionManager;
use crate::logging::Logger;
use crate::mcp::{McpConnector, ServerTarget, ToolHostConnector};
use crate::memory::ConversationMemory;
use crate::providers::{create_provider, CompletionRequest, ContentBlock, Provider};
use crate::types::{
    ChatMessage, ClientResponse, ContentPart, ConversationTurn, MessageRole, ToolCall,
    ToolDescriptor, ToolInvocationRecord,
};

use super::error::{ClientError, ClientResult};

/// Answer placeholder when the model produced no text at all
pub const NO_RESPONSE: &str = "No response generated";

/// Conversational client over one tool-host and one language model
///
/// Queries are processed one at a time; every method that can change state
/// takes `&mut self`.
pub struct BridgeClient {
    connection: ConnectionManager,
    memory: ConversationMemory,
    provider: Box<dyn Provider>,
    model: String,
    max_tokens: u32,
    system_prompt: String,
    logger: Arc<dyn Logger>,
}

impl BridgeClient {
    /// Create a client that spawns real MCP servers and talks to the
    /// configured provider
    pub fn new(config: &ClientConfig, logger: Arc<dyn Logger>) -> Self {
        let provider = create_provider(config, Arc::clone(&logger));
        let connector = Box::new(McpConnector::new(Arc::clone(&logger)));
        Self::with_parts(config, provider, connector, logger)
    }

    /// Create a client from explicit provider and connector implementations
    pub fn with_parts(
        config: &ClientConfig,
        provider: Box<dyn Provider>,
        connector: Box<dyn ToolHostConnector>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let connection = ConnectionManager::new(connector, Arc::clone(&logger))
            .with_tool_timeout(config.tool_timeout);

        Self {
            connection,
            memory: ConversationMemory::new(config.max_context_messages),
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            system_prompt: config.system_prompt.clone(),
            logger,
        }
    }

    /// Launch the server script at `path` and connect to it
    ///
    /// `.py` scripts run under `python`, `.js` under `node`, anything else is
    /// executed directly.
    pub async fn connect(&mut self, path: &str) -> ClientResponse {
        self.connect_target(&ServerTarget::from_path(path)).await
    }

    /// Connect to `target`, replacing any existing connection
    pub async fn connect_target(&mut self, target: &ServerTarget) -> ClientResponse {
        match self.connection.connect(target).await {
            Ok(summary) => ClientResponse::success(summary.message(), Vec::new()),
            Err(e) => ClientResponse::failure(format!(
                "Failed to connect to server: {}",
                ClientError::Connection(e)
            )),
        }
    }

    /// Tools discovered on the last successful connect
    pub fn available_tools(&self) -> Vec<ToolDescriptor> {
        self.connection.registry().list()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// The remembered conversation, oldest turn first
    pub fn conversation(&self) -> Vec<ConversationTurn> {
        self.memory.snapshot()
    }

    pub fn clear_conversation(&mut self) {
        self.memory.clear();
        self.logger.info("[BridgeClient] Conversation cleared");
    }

    /// Answer one user query, using tools when the model asks for them
    ///
    /// Never fails outright: errors come back as a failed response. When the
    /// client is not connected the conversation is left untouched.
    pub async fn process_query(&mut self, query: &str) -> ClientResponse {
        if !self.connection.is_connected() {
            return ClientResponse::failure(ClientError::NotConnected.to_string());
        }

        self.memory.append(MessageRole::User, query);

        match self.run_query().await {
            Ok((answer, records)) => ClientResponse::success(answer, records),
            Err(e) => {
                self.logger
                    .error(&format!("[BridgeClient] Query failed: {}", e));
                ClientResponse::failure(format!("Error processing query: {}", e))
            }
        }
    }

    async fn run_query(&mut self) -> ClientResult<(String, Vec<ToolInvocationRecord>)> {
        let messages = self.memory.to_messages();
        let request = CompletionRequest::new(&self.model, self.max_tokens, messages.clone())
            .with_system(&self.system_prompt)
            .with_tools(self.connection.registry().to_provider_format());

        let response = self.provider.complete(request).await?;
        let calls: Vec<ToolCall> = response.tool_calls().into_iter().cloned().collect();

        let mut records = Vec::new();
        let texts: Vec<String> = if calls.is_empty() {
            response.texts().into_iter().map(String::from).collect()
        } else {
            let assistant_parts = response
                .blocks
                .iter()
                .map(|block| match block {
                    ContentBlock::Text(text) => ContentPart::text(text.clone()),
                    ContentBlock::ToolUse(call) => {
                        ContentPart::tool_use(&call.id, &call.name, call.input.clone())
                    }
                })
                .collect();

            let mut result_parts = Vec::with_capacity(calls.len());
            for call in calls {
                self.logger.info(&format!(
                    "[BridgeClient] Calling tool {} with {}",
                    call.name, call.input
                ));
                let output = self.connection.invoke(&call.name, call.input.clone()).await?;
                let result = output.first_text().to_string();
                result_parts.push(ContentPart::tool_result(&call.id, result.clone()));
                records.push(ToolInvocationRecord::new(call.name, call.input, result));
            }

            let mut followup_messages = messages;
            followup_messages.push(ChatMessage::with_parts(MessageRole::Assistant, assistant_parts));
            followup_messages.push(ChatMessage::with_parts(MessageRole::User, result_parts));

            let followup = CompletionRequest::new(&self.model, self.max_tokens, followup_messages)
                .with_system(&self.system_prompt);
            let followup_response = self.provider.complete(followup).await?;

            let ignored = followup_response.tool_calls().len();
            if ignored > 0 {
                self.logger.warn(&format!(
                    "[BridgeClient] Ignoring {} tool request(s) in follow-up response",
                    ignored
                ));
            }
            followup_response
                .texts()
                .into_iter()
                .map(String::from)
                .collect()
        };

        let mut answer = texts.join("\n");
        if answer.is_empty() {
            answer = NO_RESPONSE.to_string();
        }
        self.memory.append(MessageRole::Assistant, answer.clone());

        Ok((answer, records))
    }

    /// Release the tool-host session and forget the conversation
    ///
    /// Safe to call repeatedly and when never connected.
    pub async fn cleanup(&mut self) {
        self.connection.cleanup().await;
        self.memory.clear();
    }
}
