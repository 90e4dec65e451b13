//! Mock provider for testing
//!
//! Deterministic responses without network dependencies. Either echoes the
//! last user message or replays a script of responses, one per call, and
//! records every request it receives.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use super::error::{ProviderError, ProviderResult};
use super::traits::{CompletionRequest, CompletionResponse, ContentBlock, Provider};
use crate::logging::Logger;
use crate::types::{MessageContent, MessageRole};

/// Mock response mode
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Echo back the last user text
    Echo,
    /// Pop the next scripted entry; `Err` entries become provider errors
    Script(VecDeque<Result<CompletionResponse, String>>),
}

impl Default for MockMode {
    fn default() -> Self {
        MockMode::Echo
    }
}

/// Mock LLM provider for testing
pub struct MockProvider {
    mode: Mutex<MockMode>,
    requests: Mutex<Vec<CompletionRequest>>,
    logger: Arc<dyn Logger>,
}

impl MockProvider {
    /// Create an echo provider (echoes back the last user message)
    pub fn echo(logger: Arc<dyn Logger>) -> Self {
        Self {
            mode: Mutex::new(MockMode::Echo),
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Create a provider that replays `responses` in order
    pub fn scripted(responses: Vec<CompletionResponse>, logger: Arc<dyn Logger>) -> Self {
        Self {
            mode: Mutex::new(MockMode::Script(responses.into_iter().map(Ok).collect())),
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Queue an error as the next scripted entry
    pub fn then_error(self, message: impl Into<String>) -> Self {
        {
            let mut mode = self.mode.lock();
            match &mut *mode {
                MockMode::Script(queue) => queue.push_back(Err(message.into())),
                MockMode::Echo => *mode = MockMode::Script(VecDeque::from(vec![Err(message.into())])),
            }
        }
        self
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    /// Number of completions requested so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn last_user_text(request: &CompletionRequest) -> String {
        request
            .messages
            .iter()
            .rev()
            .filter(|m| m.role == MessageRole::User)
            .find_map(|m| match &m.content {
                MessageContent::Text(text) if !text.is_empty() => Some(text.clone()),
                _ => None,
            })
            .unwrap_or_else(|| "Hello from MockProvider!".to_string())
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> ProviderResult<CompletionResponse> {
        self.logger.debug("MockProvider: complete called");
        self.requests.lock().push(request.clone());

        let mut mode = self.mode.lock();
        match &mut *mode {
            MockMode::Echo => {
                let text = format!("Echo: {}", Self::last_user_text(&request));
                Ok(CompletionResponse::new(vec![ContentBlock::Text(text)]))
            }
            MockMode::Script(queue) => match queue.pop_front() {
                Some(Ok(response)) => Ok(response),
                Some(Err(message)) => Err(ProviderError::Other(format!("Mock error: {}", message))),
                None => Err(ProviderError::invalid_response("mock", "script exhausted")),
            },
        }
    }
}
