//! Engine-agnostic waddle state logic.
//!
//! - [`gate`] – six-condition predicate deciding whether an entity may waddle
//! - [`controller`] – single writer of the replicated waddle flag
//! - [`router`] – transition table from external signals to controller calls
//! - [`host`] – collaborator traits the controller is built from
//! - [`animation`] – the animation side-effect hook and waddle clip math
//!
//! Nothing in here touches a `World`; the bevy_ecs binding lives in
//! [`crate::systems::waddle`].

pub mod animation;
pub mod controller;
pub mod gate;
pub mod host;
pub mod router;
