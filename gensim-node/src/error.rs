//! Error types for the node controller

use gensim_core::domain::NodeState;
use thiserror::Error;

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, NodeError>;

/// Errors surfaced by node commands
#[derive(Debug, Error)]
pub enum NodeError {
    /// A command was issued in a state that does not permit it
    ///
    /// Rejected synchronously; the session and any in-flight job loop are
    /// unaffected.
    #[error("cannot {command} while node is {from}")]
    InvalidTransition {
        /// State the node was in when the command arrived
        from: NodeState,
        /// The rejected command
        command: &'static str,
    },

    /// The configured device name is not in the catalog
    #[error("unknown device: {0}")]
    UnknownDevice(String),

    /// The training collaborator failed to produce a metric
    ///
    /// Aborts the current job only; the run continues with a fresh job.
    #[error("training step failed: {0}")]
    StepFailed(#[from] StepError),
}

impl NodeError {
    /// Create an invalid-transition error for `command`
    pub fn invalid_transition(from: NodeState, command: &'static str) -> Self {
        Self::InvalidTransition { from, command }
    }

    /// Check if this error is a rejected transition
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}

/// Failure from the training collaborator while producing a step metric
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct StepError(pub String);

impl StepError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
