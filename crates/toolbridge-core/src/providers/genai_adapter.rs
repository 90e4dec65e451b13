//! Adapter between toolbridge-core types and genai types
//!
//! Conversion functions between our request/response shapes and genai's, so
//! the provider can rely on genai's protocol implementations.

use genai::chat::{
    ChatMessage as GenaiMessage, ChatOptions as GenaiOptions, ChatResponse as GenaiResponse,
    ContentPart as GenaiPart, Tool as GenaiTool,
    ToolCall as GenaiToolCall, ToolResponse as GenaiToolResponse,
};
use genai::resolver::{AuthData, AuthResolver, Endpoint, ServiceTargetResolver};
use genai::{adapter::AdapterKind, Client, ModelIden, ServiceTarget};

use crate::types::{ChatMessage, ContentPart, MessageContent, MessageRole, ToolCall, ToolDeclaration};

use super::traits::{CompletionResponse, ContentBlock};

// ============================================================================
// Message Conversion: toolbridge -> genai
// ============================================================================

fn text_message(role: MessageRole, text: String) -> GenaiMessage {
    match role {
        MessageRole::System => GenaiMessage::system(text),
        MessageRole::User => GenaiMessage::user(text),
        MessageRole::Assistant => GenaiMessage::assistant(text),
    }
}

/// Convert one ChatMessage into one or more genai messages
///
/// Structured messages split by kind: text parts become one text message,
/// tool-use parts one assistant tool-call message, and every tool result its
/// own tool-response message (genai groups consecutive responses per adapter).
pub fn to_genai_message(msg: ChatMessage) -> Vec<GenaiMessage> {
    let parts = match msg.content {
        MessageContent::Text(text) => return vec![text_message(msg.role, text)],
        MessageContent::Parts(parts) => parts,
    };

    let mut texts = Vec::new();
    let mut calls = Vec::new();
    let mut responses = Vec::new();
    for part in parts {
        match part {
            ContentPart::Text { text } => texts.push(text),
            ContentPart::ToolUse { id, name, input } => calls.push(GenaiToolCall {
                call_id: id,
                fn_name: name,
                fn_arguments: input,
                thought_signatures: None,
            }),
            ContentPart::ToolResult { tool_use_id, content } => {
                responses.push(GenaiToolResponse::new(tool_use_id, content))
            }
        }
    }

    let mut out = Vec::new();
    if !texts.is_empty() {
        out.push(text_message(msg.role, texts.join("\n")));
    }
    if !calls.is_empty() {
        out.push(GenaiMessage::from(calls));
    }
    out.extend(responses.into_iter().map(GenaiMessage::from));
    out
}

/// Convert a vector of messages to genai messages
pub fn to_genai_messages(messages: Vec<ChatMessage>) -> Vec<GenaiMessage> {
    messages.into_iter().flat_map(to_genai_message).collect()
}

// ============================================================================
// Tool Conversion: toolbridge -> genai
// ============================================================================

/// Convert a tool declaration to a genai Tool
pub fn to_genai_tool(tool: ToolDeclaration) -> GenaiTool {
    GenaiTool::new(&tool.name)
        .with_description(&tool.description)
        .with_schema(tool.input_schema)
}

/// Convert tool declarations to genai tools
pub fn to_genai_tools(tools: Vec<ToolDeclaration>) -> Vec<GenaiTool> {
    tools.into_iter().map(to_genai_tool).collect()
}

/// Request options
pub fn to_genai_options(max_tokens: u32) -> GenaiOptions {
    GenaiOptions::default().with_max_tokens(max_tokens)
}

// ============================================================================
// Response Conversion: genai -> toolbridge
// ============================================================================

/// Convert genai ToolCall to our ToolCall
pub fn from_genai_tool_call(tc: GenaiToolCall) -> ToolCall {
    ToolCall {
        id: tc.call_id,
        name: tc.fn_name,
        input: tc.fn_arguments,
    }
}

/// Keep text and tool-call parts, in the order the provider returned them
pub fn from_genai_response(response: GenaiResponse) -> CompletionResponse {
    let blocks = response
        .content
        .into_parts()
        .into_iter()
        .filter_map(|part| match part {
            GenaiPart::Text(text) => Some(ContentBlock::Text(text)),
            GenaiPart::ToolCall(tc) => Some(ContentBlock::ToolUse(from_genai_tool_call(tc))),
            _ => None,
        })
        .collect();

    CompletionResponse::new(blocks)
}

// ============================================================================
// Client Creation
// ============================================================================

/// Provider routing settings
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Provider identifier (e.g., "anthropic", "openai", "openrouter")
    pub provider: String,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Custom API base URL
    pub api_base: Option<String>,
}

/// Create a genai Client
///
/// Without overrides genai picks the adapter from the model name and reads its
/// default key variable (e.g. `ANTHROPIC_API_KEY`).
pub fn create_client(config: &ProviderConfig) -> Client {
    let mut builder = Client::builder();

    if let Some(env_name) = config.api_key_env.clone() {
        let auth_resolver = AuthResolver::from_resolver_fn(
            move |_model_iden: ModelIden| -> Result<Option<AuthData>, genai::resolver::Error> {
                Ok(Some(AuthData::from_env(env_name.clone())))
            },
        );
        builder = builder.with_auth_resolver(auth_resolver);
    }

    let provider = config.provider.to_lowercase();
    let api_base = config.api_base.clone();
    if api_base.is_some() || is_openai_compatible(&provider) {
        let target_resolver = ServiceTargetResolver::from_resolver_fn(
            move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                let ServiceTarget { endpoint, auth, model } = target;

                let adapter_kind = if is_openai_compatible(&provider) {
                    AdapterKind::OpenAI
                } else {
                    model.adapter_kind
                };
                let endpoint = match (&api_base, provider.as_str()) {
                    (Some(base), _) => Endpoint::from_owned(base.clone()),
                    (None, "openrouter") => Endpoint::from_static("https://openrouter.ai/api/v1/"),
                    (None, "mistral") => Endpoint::from_static("https://api.mistral.ai/v1/"),
                    (None, _) => endpoint,
                };

                Ok(ServiceTarget {
                    endpoint,
                    auth,
                    model: ModelIden::new(adapter_kind, model.model_name.clone()),
                })
            },
        );
        builder = builder.with_service_target_resolver(target_resolver);
    }

    builder.build()
}

/// Providers reached through the OpenAI wire protocol
pub fn is_openai_compatible(provider: &str) -> bool {
    matches!(provider, "openrouter" | "mistral" | "azure")
}
