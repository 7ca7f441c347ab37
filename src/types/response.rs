//! MCP response shapes for tools, resources, and prompts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Static descriptor for a tool exposed through `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolListResult {
    pub tools: Vec<ToolDefinition>,
}

/// One content block in a tool call result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
}

impl ToolCallResult {
    pub fn text(text: String) -> Self {
        Self {
            content: vec![ToolContent::Text { text }],
        }
    }

    pub fn json(value: &impl Serialize) -> Self {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|e| e.to_string());
        Self::text(text)
    }
}

/// `resources/list` result. This server exposes no resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceListResult {
    pub resources: Vec<Value>,
}

/// `prompts/list` result. This server exposes no prompts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptListResult {
    pub prompts: Vec<Value>,
}
