//! Node lifecycle domain model
//!
//! Represents the simulated compute node the user controls.

use serde::{Deserialize, Serialize};

use crate::domain::device::Device;
use crate::domain::log::LogEntry;

/// Lifecycle state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeState {
    /// Node has never run (or finished a run and restarted); no session data
    Idle,

    /// Job loop is executing steps
    Running,

    /// Job loop is suspended; current job progress is retained
    Paused,

    /// Run was aborted; session data stays visible until the next start
    Stopped,
}

impl NodeState {
    /// Whether a job loop exists for this state (Running or Paused)
    pub fn is_active(&self) -> bool {
        matches!(self, NodeState::Running | NodeState::Paused)
    }

    /// Whether a run may be started from this state
    pub fn can_start(&self) -> bool {
        matches!(self, NodeState::Idle | NodeState::Stopped)
    }
}

impl std::fmt::Display for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeState::Idle => write!(f, "Idle"),
            NodeState::Running => write!(f, "Running"),
            NodeState::Paused => write!(f, "Paused"),
            NodeState::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Read-model of a node session
///
/// Produced by the controller on demand for front ends; a point-in-time copy,
/// never a live view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: NodeState,
    pub device: Device,

    /// Name of the job currently executing, if any
    pub current_job: Option<String>,

    /// Total $SY earned this run; monotonic within a run
    pub cumulative_earnings: f64,

    /// Session feed, append-only within a run
    pub log: Vec<LogEntry>,

    /// Progress of the current job in [0, 100], or 0 with no job active
    pub progress_percent: f64,

    /// Whether the completion celebration is currently showing
    pub celebrating: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(NodeState::Idle.can_start());
        assert!(NodeState::Stopped.can_start());
        assert!(!NodeState::Running.can_start());
        assert!(!NodeState::Paused.can_start());

        assert!(NodeState::Running.is_active());
        assert!(NodeState::Paused.is_active());
        assert!(!NodeState::Idle.is_active());
        assert!(!NodeState::Stopped.is_active());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(NodeState::Paused.to_string(), "Paused");
    }
}
