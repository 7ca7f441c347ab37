//! Error types and JSON-RPC error codes for the transport server.

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId, JSONRPC_VERSION};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// All errors that can occur while processing a protocol exchange.
///
/// These map onto JSON-RPC error objects; transport-contract failures
/// (bad headers, bad Origin) are handled as bare HTTP errors before any
/// of these can arise.
#[derive(thiserror::Error, Debug)]
pub enum ProtocolError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProtocolError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        match self {
            ProtocolError::Parse(_) => PARSE_ERROR,
            ProtocolError::InvalidRequest(_) => INVALID_REQUEST,
            ProtocolError::MethodNotFound(_) => METHOD_NOT_FOUND,
            ProtocolError::InvalidParams(_) => INVALID_PARAMS,
            ProtocolError::Internal(_) => INTERNAL_ERROR,
            // Unknown tools surface with the method-not-found code.
            ProtocolError::UnknownTool(_) => METHOD_NOT_FOUND,
            ProtocolError::SessionNotFound(_) => INVALID_REQUEST,
            ProtocolError::Transport(_) | ProtocolError::Io(_) => INTERNAL_ERROR,
            ProtocolError::Json(_) => PARSE_ERROR,
        }
    }

    /// Wrap this error into a JSON-RPC error envelope carrying the
    /// originating request's id.
    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code: self.code(),
                message: self.to_string(),
                data: None,
            },
        }
    }
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_jsonrpc_spec() {
        assert_eq!(ProtocolError::MethodNotFound("x".into()).code(), -32601);
        assert_eq!(ProtocolError::Internal("x".into()).code(), -32603);
        assert_eq!(ProtocolError::Parse("x".into()).code(), -32700);
        assert_eq!(ProtocolError::InvalidParams("x".into()).code(), -32602);
        assert_eq!(ProtocolError::UnknownTool("x".into()).code(), -32601);
    }

    #[test]
    fn error_envelope_keeps_request_id() {
        let err = ProtocolError::MethodNotFound("foo".into());
        let envelope = err.to_json_rpc_error(RequestId::Number(7));
        assert_eq!(envelope.id, RequestId::Number(7));
        assert_eq!(envelope.error.code, -32601);
        assert!(envelope.error.message.contains("foo"));
    }
}
