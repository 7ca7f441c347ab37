//! Tool execution boundary.
//!
//! The transport never inspects how a tool result is produced: everything
//! behind `tools/call` is reached through the [`ToolExecutor`] capability
//! supplied at server construction time.

pub mod search;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::{error_codes, ProtocolError, ToolDefinition};

pub use search::DocumentSearchExecutor;

/// Typed failure of a tool invocation. Mapped to a JSON-RPC error object
/// inside an otherwise successful exchange, never to an HTTP failure.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution failed: {0}")]
    Failed(String),
}

impl ToolError {
    pub fn code(&self) -> i32 {
        match self {
            // Unknown tools surface with the method-not-found code.
            ToolError::UnknownTool(_) => error_codes::METHOD_NOT_FOUND,
            ToolError::InvalidArguments(_) => error_codes::INVALID_PARAMS,
            ToolError::Failed(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<ToolError> for ProtocolError {
    fn from(e: ToolError) -> Self {
        match e {
            ToolError::UnknownTool(name) => ProtocolError::UnknownTool(name),
            ToolError::InvalidArguments(msg) => ProtocolError::InvalidParams(msg),
            ToolError::Failed(msg) => ProtocolError::Internal(msg),
        }
    }
}

/// External collaborator invoked by `tools/call`.
///
/// `name` and `arguments` are passed through from the request unmodified;
/// the returned value becomes the JSON-RPC `result` verbatim.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Static descriptors advertised through `tools/list`.
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Execute a tool and return its structured result.
    async fn execute(&self, name: &str, arguments: Value) -> Result<Value, ToolError>;
}
