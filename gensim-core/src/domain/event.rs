//! Outbound node events
//!
//! Everything a front end needs to render a session arrives as a stream of
//! these events; front ends never poll controller internals.

use serde::{Deserialize, Serialize};

use crate::domain::log::LogEntry;
use crate::domain::node::NodeState;

/// A timestamped lifecycle event emitted by the node controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeEvent {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub kind: NodeEventKind,
}

impl NodeEvent {
    /// Creates an event timestamped now
    pub fn now(kind: NodeEventKind) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            kind,
        }
    }
}

/// Event payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeEventKind {
    /// Lifecycle transition took effect
    StateChanged(NodeState),

    /// A line was appended to the session feed
    Log(LogEntry),

    /// A new job was selected and is about to execute
    JobStarted { name: String },

    /// One step finished; percent is the job's new progress
    Progress { percent: f64 },

    /// A job ran to completion and paid out
    JobCompleted { reward: f64 },

    /// Cumulative session earnings changed
    EarningsChanged { total: f64 },

    /// Completion celebration started; auto-clears via `CelebrateEnded`
    Celebrate,

    /// The celebration window elapsed
    CelebrateEnded,
}
