//! Waddle library.
//!
//! A predicted boolean animation state ("is waddling") for moving mobs,
//! hosted in a bevy_ecs world. This module exposes the components, events,
//! resources, systems and the engine-agnostic controller for use in the
//! `waddle` binary and in integration tests.
//!
//! # Project Structure
//!
//! - [`waddle`] – gate evaluator, state controller and event router
//! - [`components`] – ECS components read by the gate and owned by the controller
//! - [`events`] – host events feeding the router, thread commands
//! - [`resources`] – timing, dirty marks, animator and worker thread bridges
//! - [`systems`] – observers, replication flush and worker threads
//! - [`simulation`] – headless driver used by the CLI

pub mod components;
pub mod events;
pub mod resources;
pub mod simulation;
pub mod systems;
pub mod waddle;
