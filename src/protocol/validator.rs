//! JSON-RPC request validation.

use crate::types::{JsonRpcRequest, ProtocolError, ProtocolResult, JSONRPC_VERSION};

/// Validate that a JSON-RPC request envelope is well-formed.
pub fn validate_request(request: &JsonRpcRequest) -> ProtocolResult<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(ProtocolError::InvalidRequest(format!(
            "Expected jsonrpc version \"{JSONRPC_VERSION}\", got \"{}\"",
            request.jsonrpc
        )));
    }

    if request.method.is_empty() {
        return Err(ProtocolError::InvalidRequest(
            "Method name must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RequestId;

    fn request(jsonrpc: &str, method: &str) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: jsonrpc.to_string(),
            id: RequestId::Number(1),
            method: method.to_string(),
            params: None,
        }
    }

    #[test]
    fn accepts_well_formed_requests() {
        assert!(validate_request(&request("2.0", "tools/list")).is_ok());
    }

    #[test]
    fn rejects_wrong_version_and_empty_method() {
        assert!(validate_request(&request("1.0", "tools/list")).is_err());
        assert!(validate_request(&request("2.0", "")).is_err());
    }
}
