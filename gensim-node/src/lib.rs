//! GenSim Node
//!
//! The simulated compute node: a state machine driving a cooperative job
//! loop. A controller owns the session (state, log, earnings), executes
//! simulated training jobs step by step, and publishes lifecycle events to
//! whatever front end subscribes.
//!
//! Architecture:
//! - Configuration: node settings from environment or defaults
//! - Trainer: the numeric collaborator boundary (simulated by default)
//! - Controller: inbound commands (start/pause/resume/stop) and the job loop
//! - Events: broadcast bus front ends subscribe to
//!
//! The job loop is a single tokio task per run; pause and stop ride a watch
//! channel observed at every suspension point, so commands take effect
//! without tearing a step in half.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod trainer;

pub use config::NodeConfig;
pub use controller::NodeController;
pub use error::{NodeError, Result, StepError};
pub use trainer::{SimulatedTrainer, Trainer};
