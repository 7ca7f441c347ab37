//! Session lifecycle management.

pub mod store;

pub use store::{Session, SessionMeta, SessionStore};
