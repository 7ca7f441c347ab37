//! Session table shared by all concurrently handled exchanges.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::types::Implementation;

/// One logical client connection lifecycle, addressed by an opaque token.
#[derive(Debug, Clone)]
pub struct Session {
    pub protocol_version: String,
    pub capabilities: Value,
    pub client_info: Option<Implementation>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn empty() -> Self {
        Self {
            protocol_version: String::new(),
            capabilities: Value::Null,
            client_info: None,
            created_at: Utc::now(),
        }
    }
}

/// Metadata written once per session, during `initialize`.
#[derive(Debug, Clone)]
pub struct SessionMeta {
    pub protocol_version: String,
    pub capabilities: Value,
    pub client_info: Option<Implementation>,
}

/// Injectable session store owned by the server instance.
///
/// All operations take the lock for the duration of one map access only;
/// the lock is never held across stream I/O. Sessions live until an
/// explicit DELETE or process shutdown — there is no automatic expiry.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh identifier and store an empty session record.
    pub async fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let mut table = self.inner.write().await;
        table.insert(id.clone(), Session::empty());
        tracing::info!(session = %id, "session created");
        id
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        self.inner.read().await.get(id).cloned()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.inner.read().await.contains_key(id)
    }

    /// Record negotiated metadata on an existing session. Returns false if
    /// the identifier is unknown.
    pub async fn update(&self, id: &str, meta: SessionMeta) -> bool {
        let mut table = self.inner.write().await;
        match table.get_mut(id) {
            Some(session) => {
                session.protocol_version = meta.protocol_version;
                session.capabilities = meta.capabilities;
                session.client_info = meta.client_info;
                true
            }
            None => false,
        }
    }

    /// Remove a session. Returns false if the identifier was unknown.
    pub async fn delete(&self, id: &str) -> bool {
        let removed = self.inner.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session = %id, "session deleted");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
