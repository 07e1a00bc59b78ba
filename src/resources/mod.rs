//! ECS resources made available to systems and observers.
//!
//! Overview
//! - `animator` – the installed animation hook (headless or presentation)
//! - `dirtyfields` – replication dirty marks waiting for the end-of-tick flush
//! - `gametiming` – current tick and whether it is the first-predicted pass
//! - `presentation` – bridge to the presentation thread
//! - `replication` – bridge to the replication thread
//! - `simconfig` – simulation settings loaded from INI
pub mod animator;
pub mod dirtyfields;
pub mod gametiming;
pub mod presentation;
pub mod replication;
pub mod simconfig;
