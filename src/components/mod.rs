//! ECS components for waddling entities.
//!
//! Submodules overview:
//! - [`waddle`] – replicated waddle state and its animation profile
//! - [`mobstate`] – vitality (alive / critical / dead)
//! - [`weightless`] – marker for entities outside gravity
//! - [`movementblocked`] – marker for entities that cannot move on their own
//! - [`buckled`] – restraint to a strap entity
//! - [`standing`] – posture (upright / down)
//! - [`gridmember`] – supporting surface membership
//! - [`inputmover`] – held movement buttons
//!
//! Everything except [`waddle::WaddleAnimation`] is owned by host subsystems
//! and only read by the waddle gate.

pub mod buckled;
pub mod gridmember;
pub mod inputmover;
pub mod mobstate;
pub mod movementblocked;
pub mod standing;
pub mod waddle;
pub mod weightless;
