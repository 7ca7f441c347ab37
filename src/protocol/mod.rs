//! JSON-RPC message processing.

pub mod handler;
pub mod method;
pub mod validator;

pub use handler::{Exchange, MessageProcessor};
pub use method::Method;
