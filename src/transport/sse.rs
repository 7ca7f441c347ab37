//! SSE response encoding.
//!
//! Each message becomes one `id:`/`data:` frame. Frame identifiers are
//! generated from a per-stream epoch plus a sequence number, so they are
//! unique and increasing within the stream and independent of the payload
//! — the shape a future `Last-Event-ID` resume needs.

use std::convert::Infallible;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream};
use serde_json::Value;

const KEEP_ALIVE_SECS: u64 = 15;

/// Monotonic frame identifier source for one stream.
#[derive(Debug)]
pub struct FrameIds {
    epoch_ms: u128,
    next: u64,
}

impl FrameIds {
    pub fn new() -> Self {
        let epoch_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self { epoch_ms, next: 0 }
    }

    pub fn next_id(&mut self) -> String {
        let seq = self.next;
        self.next += 1;
        format!("evt-{}-{}", self.epoch_ms, seq)
    }
}

impl Default for FrameIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame the given messages and close the stream after the last one.
///
/// Events are flushed as they are produced; the reply is a chunked
/// `text/event-stream` body, not a buffered document.
pub fn exchange_stream(
    messages: Vec<Value>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut ids = FrameIds::new();
    let events: Vec<Result<Event, Infallible>> = messages
        .into_iter()
        .map(|message| Ok(Event::default().id(ids.next_id()).data(message.to_string())))
        .collect();

    Sse::new(stream::iter(events))
}

/// Open-ended listen-mode stream for server-to-client notifications.
///
/// Nothing is emitted until the server has something to say; keep-alive
/// comments hold the connection open and the task is released as soon as
/// the peer disconnects.
pub fn listen_stream() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(stream::pending::<Result<Event, Infallible>>()).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(KEEP_ALIVE_SECS))
            .text("keep-alive"),
    )
}
