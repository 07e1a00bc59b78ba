//! Surface membership component.
//!
//! Tracks the grid (station, shuttle, planet surface) the entity currently
//! stands on. `grid == None` means the entity is floating in open space.

use bevy_ecs::prelude::{Component, Entity};

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridMember {
    pub grid: Option<Entity>,
}

impl GridMember {
    /// Membership of the given grid.
    pub fn on(grid: Entity) -> Self {
        Self { grid: Some(grid) }
    }

    /// No supporting surface.
    pub fn space() -> Self {
        Self { grid: None }
    }
}
