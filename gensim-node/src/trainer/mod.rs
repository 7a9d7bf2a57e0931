//! Training collaborator boundary
//!
//! The job loop never touches numeric training directly; it only asks a
//! [`Trainer`] for one metric per step. Anything satisfying the trait can
//! back a node: the default simulated loss curve, or a scripted fake in
//! tests.

mod simulated;

pub use simulated::SimulatedTrainer;

use async_trait::async_trait;

use crate::error::StepError;

/// One-step-at-a-time training backend
///
/// The loop calls `step` exactly once per step index within a job and
/// `reset` exactly once when the job ends, fails, or is aborted.
#[async_trait]
pub trait Trainer: Send {
    /// Produces the metric (loss) for one step
    ///
    /// This is the loop's awaited suspension point; implementations may take
    /// arbitrarily long, and the loop may drop the future if the node is
    /// stopped mid-step.
    ///
    /// # Arguments
    /// * `step_index` - 1-based index of the step within the current job
    async fn step(&mut self, step_index: u32) -> std::result::Result<f64, StepError>;

    /// Releases any per-job resources
    ///
    /// Called when a job completes, fails, or is abandoned; must be safe to
    /// call before any step has run.
    fn reset(&mut self);
}
