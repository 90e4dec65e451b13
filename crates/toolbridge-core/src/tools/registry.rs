//! Capability registry
//!
//! Caches the tool descriptors discovered on connect and converts them into
//! the provider's tool-declaration format.

use crate::types::{ToolDeclaration, ToolDescriptor};

/// Set of tools discovered from the connected tool-host
///
/// Replaced wholesale on every successful connect, never merged; empty before
/// the first connect and after cleanup.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    tools: Vec<ToolDescriptor>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly discovered set
    pub fn replace(&mut self, tools: Vec<ToolDescriptor>) {
        self.tools = tools;
    }

    pub fn clear(&mut self) {
        self.tools.clear();
    }

    /// Snapshot copy of the descriptors
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools.clone()
    }

    /// Declarations for the completion request, in discovery order
    pub fn to_provider_format(&self) -> Vec<ToolDeclaration> {
        self.tools.iter().map(ToolDeclaration::from).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_tools() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new("get_alerts", "Get weather alerts for a US state")
                .with_schema(json!({"type": "object", "properties": {"state": {"type": "string"}}})),
            ToolDescriptor::new("get_forecast", "Get weather forecast for a location"),
        ]
    }

    #[test]
    fn test_empty_by_default() {
        let registry = CapabilityRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.to_provider_format().is_empty());
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut registry = CapabilityRegistry::new();
        registry.replace(weather_tools());
        assert_eq!(registry.names(), vec!["get_alerts", "get_forecast"]);

        registry.replace(vec![ToolDescriptor::new("echo", "")]);
        assert_eq!(registry.names(), vec!["echo"]);
        assert!(registry.get("get_alerts").is_none());
    }

    #[test]
    fn test_list_is_a_copy() {
        let mut registry = CapabilityRegistry::new();
        registry.replace(weather_tools());

        let mut snapshot = registry.list();
        snapshot.clear();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_provider_format() {
        let mut registry = CapabilityRegistry::new();
        registry.replace(weather_tools());

        let declarations = registry.to_provider_format();
        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].name, "get_alerts");
        assert_eq!(declarations[0].input_schema["properties"]["state"]["type"], "string");
        assert_eq!(declarations[1].input_schema, json!({}));
    }
}
