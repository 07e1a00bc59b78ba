//! Waddle systems and observers.
//!
//! Submodules overview
//! - [`waddle`] – ECS host for the waddle controller and the event observers
//! - [`replication`] – end-of-tick dirty flush and the replication thread
//! - [`presentation`] – presentation animator hook and its playback thread
//! - [`time`] – first-predicted / replay pass switching

pub mod presentation;
pub mod replication;
pub mod time;
pub mod waddle;
