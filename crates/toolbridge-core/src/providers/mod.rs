//! LLM Provider implementations
//!
//! ## Architecture
//!
//! Real providers go through the `genai` crate, which handles the
//! provider-specific protocols (Anthropic, OpenAI, Gemini, ...) and tool
//! calling. Providers not native to genai (OpenRouter, Mistral, Azure) are
//! routed through its `ServiceTargetResolver` over the OpenAI protocol.
//!
//! The `MockProvider` is kept for testing purposes.

mod traits;
mod error;
mod genai_adapter;
mod genai_provider;
mod mock;

// Core traits and types
pub use traits::{CompletionRequest, CompletionResponse, ContentBlock, Provider};
pub use error::{ProviderError, ProviderResult};

pub use genai_provider::GenaiProvider;
pub use genai_adapter::{is_openai_compatible, ProviderConfig};

// Mock provider for testing
pub use mock::{MockMode, MockProvider};

use crate::config::ClientConfig;
use crate::logging::Logger;
use std::sync::Arc;

/// Create the provider named by `config.provider`
///
/// `mock` yields an echoing [`MockProvider`]; every other id goes to
/// [`GenaiProvider`], which also covers custom OpenAI-compatible endpoints.
pub fn create_provider(config: &ClientConfig, logger: Arc<dyn Logger>) -> Box<dyn Provider> {
    match config.provider.to_lowercase().as_str() {
        "mock" => Box::new(MockProvider::echo(logger)),
        _ => {
            let provider_config = ProviderConfig {
                provider: config.provider.clone(),
                api_key_env: config.api_key_env.clone(),
                api_base: config.api_base.clone(),
            };
            Box::new(GenaiProvider::new(provider_config, logger).with_timeout(config.provider_timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[test]
    fn test_create_provider() {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);

        let mock = create_provider(&ClientConfig::default().with_provider("mock"), Arc::clone(&logger));
        assert_eq!(mock.name(), "mock");

        let real = create_provider(&ClientConfig::default(), logger);
        assert_eq!(real.name(), "anthropic");
    }
}
