//! Core domain types
//!
//! This module contains the core domain structures used across GenSim crates.
//! These types represent the simulated node's entities and are shared between
//! the controller (for execution) and front ends (for rendering).

pub mod device;
pub mod event;
pub mod job;
pub mod log;
pub mod node;

pub use device::Device;
pub use event::{NodeEvent, NodeEventKind};
pub use job::{JobTemplate, RunningJob};
pub use log::{LogEntry, LogLevel};
pub use node::{NodeState, SessionSnapshot};
