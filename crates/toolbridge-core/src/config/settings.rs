//! Client settings and their on-disk shape

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::mcp::ServerTarget;

pub const DEFAULT_PROVIDER: &str = "anthropic";
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_MAX_CONTEXT_MESSAGES: usize = 20;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant with access to weather tools. \
You can have conversations, answer questions on any topic, and use weather tools when appropriate. \
Be conversational and remember previous parts of our conversation.";

/// Resolved settings for one client instance
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Provider id (e.g. "anthropic", "openai", "mock")
    pub provider: String,
    /// Model identifier as used by the provider's API
    pub model: String,
    /// Environment variable holding the API key; provider default when unset
    pub api_key_env: Option<String>,
    /// Custom API base URL
    pub api_base: Option<String>,
    /// Maximum output tokens per completion
    pub max_tokens: u32,
    /// Conversation window size (turns)
    pub max_context_messages: usize,
    pub system_prompt: String,
    pub tool_timeout: Option<Duration>,
    pub provider_timeout: Option<Duration>,
    /// Tool-host to connect to when none is given on the command line
    pub server: Option<ServerTarget>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: None,
            api_base: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_context_messages: DEFAULT_MAX_CONTEXT_MESSAGES,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            tool_timeout: None,
            provider_timeout: None,
            server: None,
        }
    }
}

impl ClientConfig {
    /// Set the provider id
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the conversation window size
    pub fn with_max_context_messages(mut self, max: usize) -> Self {
        self.max_context_messages = max;
        self
    }

    /// Set the per-tool-call deadline
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = Some(timeout);
        self
    }

    /// Set the per-completion deadline
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = Some(timeout);
        self
    }
}

/// Configuration file structure; every field is optional so files can be layered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_context_messages: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerTarget>,
}

impl ConfigFile {
    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn merge(self, other: ConfigFile) -> ConfigFile {
        ConfigFile {
            provider: other.provider.or(self.provider),
            model: other.model.or(self.model),
            api_key_env: other.api_key_env.or(self.api_key_env),
            api_base: other.api_base.or(self.api_base),
            max_tokens: other.max_tokens.or(self.max_tokens),
            max_context_messages: other.max_context_messages.or(self.max_context_messages),
            system_prompt: other.system_prompt.or(self.system_prompt),
            tool_timeout_secs: other.tool_timeout_secs.or(self.tool_timeout_secs),
            provider_timeout_secs: other.provider_timeout_secs.or(self.provider_timeout_secs),
            server: other.server.or(self.server),
        }
    }

    /// Fill unset fields with defaults and validate
    pub fn resolve(self) -> ConfigResult<ClientConfig> {
        let defaults = ClientConfig::default();

        let max_context_messages = self
            .max_context_messages
            .unwrap_or(defaults.max_context_messages);
        if max_context_messages == 0 {
            return Err(ConfigError::Invalid(
                "max_context_messages must be at least 1".to_string(),
            ));
        }
        let max_tokens = self.max_tokens.unwrap_or(defaults.max_tokens);
        if max_tokens == 0 {
            return Err(ConfigError::Invalid("max_tokens must be at least 1".to_string()));
        }

        Ok(ClientConfig {
            provider: self.provider.unwrap_or(defaults.provider),
            model: self.model.unwrap_or(defaults.model),
            api_key_env: self.api_key_env,
            api_base: self.api_base,
            max_tokens,
            max_context_messages,
            system_prompt: self.system_prompt.unwrap_or(defaults.system_prompt),
            tool_timeout: self.tool_timeout_secs.map(Duration::from_secs),
            provider_timeout: self.provider_timeout_secs.map(Duration::from_secs),
            server: self.server,
        })
    }
}
