//! HTTP endpoint — method routing, header contracts, CORS.
//!
//! A single `/mcp` route multiplexes the transport: POST carries client
//! messages, GET opens a listen-mode stream, DELETE ends a session, and
//! OPTIONS preflights are answered by the CORS layer. `/health` sits
//! outside the origin check so probes work without headers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method as HttpMethod, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::protocol::MessageProcessor;
use crate::session::SessionStore;
use crate::types::{ProtocolError, ProtocolResult, SERVER_NAME, SERVER_VERSION};

use super::origin::OriginPolicy;
use super::sse::{exchange_stream, listen_stream};

/// Session correlator header, set by the server on `initialize` and echoed
/// by the client on every subsequent call.
pub const MCP_SESSION_HEADER: &str = "mcp-session-id";

const CORS_MAX_AGE_SECS: u64 = 86_400;

/// Shared server state passed to all handlers via axum State.
pub struct ServerState {
    pub processor: MessageProcessor,
    pub origin: OriginPolicy,
}

impl ServerState {
    pub fn new(processor: MessageProcessor, origin: OriginPolicy) -> Self {
        Self { processor, origin }
    }

    fn sessions(&self) -> &Arc<SessionStore> {
        self.processor.sessions()
    }
}

/// Build the transport router.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(
            "/mcp",
            post(handle_post).get(handle_get).delete(handle_delete),
        )
        .layer(middleware::from_fn_with_state(state.clone(), origin_layer))
        .layer(cors_layer())
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Run the HTTP server on the given address.
pub async fn serve(state: Arc<ServerState>, addr: &str) -> ProtocolResult<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(ProtocolError::Io)?;

    tracing::info!("HTTP transport listening on {addr}");
    tracing::info!("MCP endpoint: http://{addr}/mcp");

    axum::serve(listener, app)
        .await
        .map_err(|e| ProtocolError::Transport(e.to_string()))?;

    Ok(())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            HttpMethod::GET,
            HttpMethod::POST,
            HttpMethod::DELETE,
            HttpMethod::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            HeaderName::from_static(MCP_SESSION_HEADER),
            HeaderName::from_static("last-event-id"),
        ])
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS))
}

/// Origin check — runs before any session or message processing.
/// `/health` is handled by a separate route that bypasses this layer.
async fn origin_layer(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let origin = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok());

    if !state.origin.is_allowed(origin) {
        tracing::warn!(
            origin = origin.unwrap_or_default(),
            "rejected request from disallowed origin"
        );
        return client_error(StatusCode::FORBIDDEN, "Unsafe origin");
    }

    next.run(request).await
}

async fn handle_post(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let content_type = header_str(&headers, header::CONTENT_TYPE.as_str()).unwrap_or_default();
    if !content_type.starts_with("application/json") {
        return client_error(
            StatusCode::BAD_REQUEST,
            "Content-Type must be application/json",
        );
    }

    let accept = header_str(&headers, header::ACCEPT.as_str()).unwrap_or_default();
    let wants_sse = accept.contains("text/event-stream");
    if !accept.contains("application/json") && !wants_sse {
        return client_error(
            StatusCode::BAD_REQUEST,
            "Accept header must include application/json or text/event-stream",
        );
    }

    let session_id = header_str(&headers, MCP_SESSION_HEADER);
    if let Some(id) = &session_id {
        if !state.sessions().contains(id).await {
            return client_error(StatusCode::NOT_FOUND, "Session not found");
        }
    }

    // A body that is not JSON at all is a transport-level 400; anything
    // parseable is answered inside the JSON-RPC envelope instead.
    let decoded: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting malformed request body");
            return client_error(StatusCode::BAD_REQUEST, "Request body is not valid JSON");
        }
    };

    let (elements, batched) = match decoded {
        Value::Array(items) => (items, true),
        single => (vec![single], false),
    };

    let exchange = state.processor.process(elements, session_id).await;

    // Only notifications or client responses: acknowledge, no body.
    if exchange.responses.is_empty() {
        return StatusCode::ACCEPTED.into_response();
    }

    let mut response = if wants_sse {
        exchange_stream(exchange.responses).into_response()
    } else {
        let body = if batched {
            Value::Array(exchange.responses)
        } else {
            exchange.responses.into_iter().next().unwrap_or(Value::Null)
        };
        Json(body).into_response()
    };

    attach_session(&mut response, exchange.minted_session);
    response
}

async fn handle_get(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    let accept = header_str(&headers, header::ACCEPT.as_str()).unwrap_or_default();
    if !accept.contains("text/event-stream") {
        return client_error(
            StatusCode::METHOD_NOT_ALLOWED,
            "GET requires Accept: text/event-stream",
        );
    }

    let Some(session_id) = header_str(&headers, MCP_SESSION_HEADER) else {
        return client_error(StatusCode::NOT_FOUND, "Session not found");
    };
    if !state.sessions().contains(&session_id).await {
        return client_error(StatusCode::NOT_FOUND, "Session not found");
    }

    tracing::debug!(session = %session_id, "opened listen stream");
    listen_stream().into_response()
}

async fn handle_delete(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    match header_str(&headers, MCP_SESSION_HEADER) {
        Some(id) if state.sessions().delete(&id).await => StatusCode::OK.into_response(),
        _ => client_error(StatusCode::NOT_FOUND, "Session not found"),
    }
}

/// Liveness probe — static document, not part of the protocol.
async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVER_NAME,
        "version": SERVER_VERSION,
        "transport": "streamable_http",
        "mcp_endpoint": "/mcp",
    }))
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

fn attach_session(response: &mut Response, minted: Option<String>) {
    if let Some(id) = minted {
        if let Ok(value) = HeaderValue::from_str(&id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(MCP_SESSION_HEADER), value);
        }
    }
}

fn client_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
