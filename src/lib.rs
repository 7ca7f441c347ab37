//! MCP server speaking the Streamable HTTP transport — JSON-RPC over HTTP
//! with an SSE reply channel.

pub mod config;
pub mod protocol;
pub mod session;
pub mod tools;
pub mod transport;
pub mod types;

pub use protocol::MessageProcessor;
pub use session::SessionStore;
pub use tools::{DocumentSearchExecutor, ToolError, ToolExecutor};
pub use transport::{OriginPolicy, ServerState};
