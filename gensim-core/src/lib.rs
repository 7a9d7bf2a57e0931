//! GenSim Core
//!
//! Core types and abstractions for the GenSim node simulator.
//!
//! This crate contains:
//! - Domain types: Core entities (Device, JobTemplate, NodeState, etc.)
//! - Catalog: the static device/job registry
//! - Reward: the payout model

pub mod catalog;
pub mod domain;
pub mod reward;
