//! Message processor — decodes JSON-RPC elements and dispatches them.
//!
//! This is the computation half of an exchange: it mutates the session
//! store and produces response envelopes, but knows nothing about HTTP or
//! SSE rendering. The transport endpoint decides how the produced
//! responses are framed.

use std::sync::Arc;

use serde_json::Value;

use crate::session::{SessionMeta, SessionStore};
use crate::tools::ToolExecutor;
use crate::types::*;

use super::method::Method;
use super::validator::validate_request;

/// Everything one POST body produced: the response envelopes for the
/// `method`-bearing elements, and the session identifier minted if an
/// `initialize` arrived without one.
#[derive(Debug, Default)]
pub struct Exchange {
    pub responses: Vec<Value>,
    pub minted_session: Option<String>,
}

/// Dispatches decoded JSON-RPC messages to their handlers.
pub struct MessageProcessor {
    sessions: Arc<SessionStore>,
    executor: Arc<dyn ToolExecutor>,
}

impl MessageProcessor {
    pub fn new(sessions: Arc<SessionStore>, executor: Arc<dyn ToolExecutor>) -> Self {
        Self { sessions, executor }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Process a batch of raw JSON elements in array order.
    ///
    /// Each element is handled independently: a malformed or failing
    /// element yields an error envelope without disturbing its neighbors.
    /// Only requests produce output, so an all-notification batch returns
    /// an empty response set.
    pub async fn process(&self, elements: Vec<Value>, session_id: Option<String>) -> Exchange {
        let mut exchange = Exchange::default();
        // A session minted by an initialize earlier in the batch is visible
        // to the elements after it.
        let mut effective = session_id;

        for element in elements {
            if let Some(response) = self
                .process_element(element, &mut effective, &mut exchange.minted_session)
                .await
            {
                exchange.responses.push(response);
            }
        }

        exchange
    }

    async fn process_element(
        &self,
        element: Value,
        effective: &mut Option<String>,
        minted: &mut Option<String>,
    ) -> Option<Value> {
        let message: JsonRpcMessage = match serde_json::from_value(element) {
            Ok(msg) => msg,
            Err(e) => {
                let err = ProtocolError::InvalidRequest(format!("Not a JSON-RPC message: {e}"));
                return Some(error_envelope(err, RequestId::Null));
            }
        };

        match message {
            JsonRpcMessage::Request(req) => {
                Some(self.handle_request(req, effective, minted).await)
            }
            JsonRpcMessage::Notification(notification) => {
                self.handle_notification(notification);
                None
            }
            JsonRpcMessage::Response(_) | JsonRpcMessage::Error(_) => {
                tracing::debug!("ignoring client-sent response message");
                None
            }
        }
    }

    async fn handle_request(
        &self,
        request: JsonRpcRequest,
        effective: &mut Option<String>,
        minted: &mut Option<String>,
    ) -> Value {
        let id = request.id.clone();

        if let Err(e) = validate_request(&request) {
            return error_envelope(e, id);
        }

        let method = match Method::parse(&request.method) {
            Some(method) => method,
            None => {
                tracing::warn!(method = %request.method, "method not found");
                return error_envelope(ProtocolError::MethodNotFound(request.method), id);
            }
        };

        // Every method except initialize needs an established session,
        // either from the request header or from an initialize earlier in
        // the same batch.
        if method != Method::Initialize && effective.is_none() {
            let err = ProtocolError::InvalidRequest(
                "Server not initialized: call initialize or supply Mcp-Session-Id".to_string(),
            );
            return error_envelope(err, id);
        }

        let result = match method {
            Method::Initialize => {
                self.handle_initialize(request.params, effective, minted)
                    .await
            }
            Method::ToolsList => self.handle_tools_list(),
            Method::ToolsCall => self.handle_tools_call(request.params).await,
            Method::ResourcesList => to_result(ResourceListResult::default()),
            Method::PromptsList => to_result(PromptListResult::default()),
        };

        match result {
            Ok(value) => serde_json::to_value(JsonRpcResponse::new(id, value)).unwrap_or_default(),
            Err(e) => {
                if matches!(e, ProtocolError::Internal(_)) {
                    tracing::error!(method = method.as_str(), error = %e, "handler failed");
                }
                error_envelope(e, id)
            }
        }
    }

    fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "initialized" | "notifications/initialized" => {
                tracing::info!("client handshake complete");
            }
            "notifications/cancelled" => {
                tracing::info!("received cancellation notification");
            }
            other => {
                tracing::debug!(method = other, "unknown notification");
            }
        }
    }

    async fn handle_initialize(
        &self,
        params: Option<Value>,
        effective: &mut Option<String>,
        minted: &mut Option<String>,
    ) -> ProtocolResult<Value> {
        let init: InitializeParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| ProtocolError::InvalidParams(e.to_string()))?
            .ok_or_else(|| ProtocolError::InvalidParams("Initialize params required".to_string()))?;

        if init.protocol_version != MCP_VERSION {
            tracing::warn!(
                requested = %init.protocol_version,
                supported = MCP_VERSION,
                "client requested a different protocol version, answering with ours"
            );
        }

        let meta = SessionMeta {
            protocol_version: init.protocol_version,
            capabilities: init.capabilities,
            client_info: init.client_info.clone(),
        };

        match effective.as_deref() {
            // Re-initialize on a live session updates it in place.
            Some(id) if self.sessions.contains(id).await => {
                self.sessions.update(id, meta).await;
            }
            _ => {
                let id = self.sessions.create().await;
                self.sessions.update(&id, meta).await;
                *minted = Some(id.clone());
                *effective = Some(id);
            }
        }

        if let Some(client) = init.client_info {
            tracing::info!(client = %client.name, version = %client.version, "session initialized");
        }

        to_result(InitializeResult::default_result())
    }

    fn handle_tools_list(&self) -> ProtocolResult<Value> {
        to_result(ToolListResult {
            tools: self.executor.definitions(),
        })
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> ProtocolResult<Value> {
        let call: ToolCallParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| ProtocolError::InvalidParams(e.to_string()))?
            .ok_or_else(|| ProtocolError::InvalidParams("Tool call params required".to_string()))?;

        let arguments = call
            .arguments
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        let value = self.executor.execute(&call.name, arguments).await?;
        Ok(value)
    }
}

fn to_result(value: impl serde::Serialize) -> ProtocolResult<Value> {
    serde_json::to_value(value).map_err(|e| ProtocolError::Internal(e.to_string()))
}

fn error_envelope(error: ProtocolError, id: RequestId) -> Value {
    serde_json::to_value(error.to_json_rpc_error(id)).unwrap_or_default()
}
