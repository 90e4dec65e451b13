//! Uniform result envelope returned to callers

use serde::Serialize;

use super::tool::ToolInvocationRecord;

/// Outcome of a public client call
///
/// `success == false` implies empty content and a non-empty error;
/// `success == true` implies no error. Build through [`ClientResponse::success`]
/// or [`ClientResponse::failure`]; the envelope is serialize-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientResponse {
    success: bool,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    tool_calls: Vec<ToolInvocationRecord>,
}

impl ClientResponse {
    pub fn success(content: impl Into<String>, tool_calls: Vec<ToolInvocationRecord>) -> Self {
        Self {
            success: true,
            content: content.into(),
            error: None,
            tool_calls,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.is_empty() {
            error = "Unknown error".to_string();
        }
        Self {
            success: false,
            content: String::new(),
            error: Some(error),
            tool_calls: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn tool_calls(&self) -> &[ToolInvocationRecord] {
        &self.tool_calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_has_no_error() {
        let record = ToolInvocationRecord::new("get_weather", json!({"city": "Boston"}), "Sunny");
        let resp = ClientResponse::success("It is sunny.", vec![record]);
        assert!(resp.is_success());
        assert_eq!(resp.error(), None);
        assert_eq!(resp.tool_calls().len(), 1);
    }

    #[test]
    fn test_failure_has_empty_content() {
        let resp = ClientResponse::failure("boom");
        assert!(!resp.is_success());
        assert_eq!(resp.content(), "");
        assert_eq!(resp.error(), Some("boom"));
        assert!(resp.tool_calls().is_empty());
    }

    #[test]
    fn test_failure_error_never_empty() {
        let resp = ClientResponse::failure("");
        assert!(!resp.error().unwrap().is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let ok = serde_json::to_value(ClientResponse::success("done", Vec::new())).unwrap();
        assert_eq!(ok, json!({"success": true, "content": "done", "tool_calls": []}));

        let failed = serde_json::to_value(ClientResponse::failure("boom")).unwrap();
        assert_eq!(failed["success"], json!(false));
        assert_eq!(failed["content"], json!(""));
        assert_eq!(failed["error"], json!("boom"));
    }
}
