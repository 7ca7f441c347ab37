//! Built-in document search executor.
//!
//! Stands in for the vector store behind the transport: `search_documents`
//! returns ranked placeholder hits so the full protocol path can run
//! without an embedding backend attached.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::types::{ToolCallResult, ToolDefinition, SERVER_NAME, SERVER_VERSION};

use super::{ToolError, ToolExecutor};

const DEFAULT_SEARCH_LIMIT: u64 = 5;

pub struct DocumentSearchExecutor;

impl DocumentSearchExecutor {
    pub fn new() -> Self {
        Self
    }

    fn search_documents(&self, arguments: &Value) -> Result<Value, ToolError> {
        let query = arguments
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("'query' must be a string".to_string()))?;
        let limit = arguments
            .get("limit")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_SEARCH_LIMIT) as usize;

        tracing::info!(%query, limit, "searching documents");

        let mut hits = vec![
            json!({
                "content": format!("Matched document 1 for query '{query}'"),
                "score": 0.95,
                "metadata": { "source": "doc1.pdf", "page": 1 }
            }),
            json!({
                "content": format!("Matched document 2 for query '{query}'"),
                "score": 0.87,
                "metadata": { "source": "doc2.pdf", "page": 3 }
            }),
        ];
        hits.truncate(limit);

        let result = ToolCallResult::json(&hits);
        serde_json::to_value(result).map_err(|e| ToolError::Failed(e.to_string()))
    }

    fn server_info(&self) -> Result<Value, ToolError> {
        let info = json!({
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "status": "running",
            "transport": "streamable_http",
            "capabilities": ["search", "info"]
        });

        let result = ToolCallResult::json(&info);
        serde_json::to_value(result).map_err(|e| ToolError::Failed(e.to_string()))
    }
}

impl Default for DocumentSearchExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for DocumentSearchExecutor {
    fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: "search_documents".to_string(),
                description: Some("Search documents in the vector store".to_string()),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search query"
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of results",
                            "default": DEFAULT_SEARCH_LIMIT
                        }
                    },
                    "required": ["query"]
                }),
            },
            ToolDefinition {
                name: "get_server_info".to_string(),
                description: Some("Get information about this server".to_string()),
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
        ]
    }

    async fn execute(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        match name {
            "search_documents" => self.search_documents(&arguments),
            "get_server_info" => self.server_info(),
            _ => Err(ToolError::UnknownTool(name.to_string())),
        }
    }
}
