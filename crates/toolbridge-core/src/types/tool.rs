//! Tool/function calling types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder recorded when the tool-host returns no text content
pub const NO_RESULT: &str = "No result";

/// A capability exposed by the tool-host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name (unique per host)
    pub name: String,
    /// Human-readable description, empty when the host omits it
    #[serde(default)]
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Create a new descriptor with an empty object schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: Value::Object(Default::default()),
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }
}

/// Tool declaration in the shape the completion provider expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl From<&ToolDescriptor> for ToolDeclaration {
    fn from(descriptor: &ToolDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            input_schema: descriptor.input_schema.clone(),
        }
    }
}

/// Tool call requested by the LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Correlation identifier for this tool call
    pub id: String,
    /// Name of the tool being called
    pub name: String,
    /// Input arguments for the tool
    pub input: Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

/// One part of a tool-host result; non-text parts carry no text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutputPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Result returned by the tool-host for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ToolOutputPart>,
    /// The host flagged the result as a tool-level error
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolOutput {
    /// A single text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolOutputPart {
                text: Some(text.into()),
            }],
            is_error: false,
        }
    }

    /// No content parts at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// First text-bearing part, or [`NO_RESULT`]
    pub fn first_text(&self) -> &str {
        self.content
            .iter()
            .find_map(|part| part.text.as_deref())
            .unwrap_or(NO_RESULT)
    }
}

/// Record of one tool call made while answering a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationRecord {
    pub tool: String,
    pub args: Value,
    pub result: String,
}

impl ToolInvocationRecord {
    pub fn new(tool: impl Into<String>, args: Value, result: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            args,
            result: result.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_to_declaration() {
        let descriptor = ToolDescriptor::new("get_weather", "Get the current weather")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "city": { "type": "string" }
                },
                "required": ["city"]
            }));

        let declaration = ToolDeclaration::from(&descriptor);
        assert_eq!(declaration.name, "get_weather");
        assert_eq!(declaration.input_schema["required"][0], "city");

        let json = serde_json::to_value(&declaration).unwrap();
        assert!(json.get("inputSchema").is_some());
    }

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let descriptor: ToolDescriptor = serde_json::from_value(json!({
            "name": "get_alerts",
            "inputSchema": {"type": "object"}
        }))
        .unwrap();
        assert_eq!(descriptor.description, "");
    }

    #[test]
    fn test_first_text() {
        assert_eq!(ToolOutput::text("72F, sunny").first_text(), "72F, sunny");
        assert_eq!(ToolOutput::empty().first_text(), NO_RESULT);

        let image_then_text = ToolOutput {
            content: vec![
                ToolOutputPart { text: None },
                ToolOutputPart { text: Some("caption".into()) },
            ],
            is_error: false,
        };
        assert_eq!(image_then_text.first_text(), "caption");
    }
}
