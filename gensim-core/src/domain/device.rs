//! Device domain model
//!
//! Represents the simulated GPU a node contributes to the network.

use serde::{Deserialize, Serialize};

/// A simulated compute device
///
/// Chosen from the catalog before a run starts and fixed until the node
/// returns to Idle or Stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Display name (e.g., "RTX 4090")
    pub name: String,

    /// Throughput relative to the baseline device
    ///
    /// Faster devices finish steps sooner and earn proportionally more.
    /// Always positive.
    pub relative_speed: f64,
}

impl Device {
    pub fn new(name: impl Into<String>, relative_speed: f64) -> Self {
        Self {
            name: name.into(),
            relative_speed,
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (x{:.1})", self.name, self.relative_speed)
    }
}
