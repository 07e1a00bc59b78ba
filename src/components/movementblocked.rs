//! Movement blocker marker.
//!
//! Present while the entity cannot move under its own power (broken legs,
//! paralysis, cuffs on the feet, ...).

use bevy_ecs::prelude::Component;

/// Tag component: the entity currently cannot move.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct MovementBlocked;
