//! Event types used by the waddle simulation.
//!
//! Submodules:
//! - [`movement`] – movement input, standing up, being knocked down
//! - [`status`] – stun, buckle and vitality changes
//! - [`gravity`] – gravity gained or lost
//! - [`animation`] – commands for the presentation thread
//! - [`replication`] – field deltas and commands for the replication thread
pub mod animation;
pub mod gravity;
pub mod movement;
pub mod replication;
pub mod status;
