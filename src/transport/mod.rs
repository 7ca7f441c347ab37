//! Streamable HTTP transport.

pub mod http;
pub mod origin;
pub mod sse;

pub use http::{router, serve, ServerState, MCP_SESSION_HEADER};
pub use origin::OriginPolicy;
