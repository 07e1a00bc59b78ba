//! Restraint component.
//!
//! Present while the entity is buckled to another object (a chair, a bed, a
//! vehicle seat). The strap owner is kept for diagnostics.

use bevy_ecs::prelude::{Component, Entity};

/// The entity is buckled to `strap`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Buckled {
    pub strap: Entity,
}

impl Buckled {
    pub fn new(strap: Entity) -> Self {
        Self { strap }
    }
}
