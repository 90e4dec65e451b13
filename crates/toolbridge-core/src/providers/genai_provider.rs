//! GenaiProvider - provider backed by the genai crate
//!
//! Handles every genai-supported API (Anthropic, OpenAI, Gemini, ...) plus
//! OpenAI-compatible endpoints routed by the service target resolver.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use genai::chat::ChatRequest;
use genai::Client;

use crate::logging::Logger;

use super::error::{ProviderError, ProviderResult};
use super::genai_adapter::{
    create_client, from_genai_response, to_genai_messages, to_genai_options, to_genai_tools,
    ProviderConfig,
};
use super::traits::{CompletionRequest, CompletionResponse, Provider};

/// Provider using genai for all supported LLM APIs
pub struct GenaiProvider {
    /// Provider identifier
    provider_id: String,
    client: Client,
    /// Deadline per completion, if any
    timeout: Option<Duration>,
    logger: Arc<dyn Logger>,
}

impl GenaiProvider {
    /// Create a new GenaiProvider
    pub fn new(config: ProviderConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            provider_id: config.provider.clone(),
            client: create_client(&config),
            timeout: None,
            logger,
        }
    }

    /// Fail completions that take longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Extract model name from a model string (e.g., "openai/gpt-4" -> "gpt-4")
    pub fn extract_model_name(model: &str) -> &str {
        model.split('/').nth(1).unwrap_or(model)
    }
}

#[async_trait]
impl Provider for GenaiProvider {
    fn name(&self) -> &str {
        &self.provider_id
    }

    async fn complete(&self, request: CompletionRequest) -> ProviderResult<CompletionResponse> {
        let model_name = Self::extract_model_name(&request.model).to_string();
        self.logger.info(&format!(
            "[GenaiProvider] complete called: provider={}, model={}, messages={}, tools={}",
            self.provider_id,
            model_name,
            request.messages.len(),
            request.tools.len()
        ));

        let mut chat_req = ChatRequest::new(to_genai_messages(request.messages));
        if let Some(system) = request.system {
            chat_req = chat_req.with_system(system);
        }
        if !request.tools.is_empty() {
            chat_req = chat_req.with_tools(to_genai_tools(request.tools));
        }
        let options = to_genai_options(request.max_tokens);

        let call = self.client.exec_chat(&model_name, chat_req, Some(&options));
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                ProviderError::Timeout {
                    provider: self.provider_id.clone(),
                    secs: limit.as_secs(),
                }
            })?,
            None => call.await,
        };

        let response = result.map_err(|e| {
            self.logger
                .error(&format!("[GenaiProvider] Request failed: {}", e));
            ProviderError::api_error(&self.provider_id, e.to_string())
        })?;

        let response = from_genai_response(response);
        self.logger.debug(&format!(
            "[GenaiProvider] Received {} content blocks",
            response.blocks.len()
        ));
        Ok(response)
    }
}
