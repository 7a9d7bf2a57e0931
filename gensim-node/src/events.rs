//! Event bus
//!
//! Fan-out of controller events to front ends. Subscribers that fall behind
//! lose oldest events first (broadcast semantics); the session log in the
//! snapshot remains the complete record.

use gensim_core::domain::{NodeEvent, NodeEventKind};
use tokio::sync::broadcast;

/// Buffered events per subscriber before lagging sets in
const CHANNEL_CAPACITY: usize = 256;

/// Broadcast bus for node events
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<NodeEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Opens a new subscription; only events emitted after this call are seen
    pub fn subscribe(&self) -> broadcast::Receiver<NodeEvent> {
        self.tx.subscribe()
    }

    /// Emits an event timestamped now
    ///
    /// Delivery is best-effort: with no subscribers the event is dropped,
    /// which is fine because the session log is the durable record.
    pub fn emit(&self, kind: NodeEventKind) {
        let _ = self.tx.send(NodeEvent::now(kind));
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
