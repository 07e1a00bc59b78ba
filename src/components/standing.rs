//! Posture component.
//!
//! Entities without a `Standing` component are treated as upright.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Standing {
    #[default]
    Upright,
    Down,
}

impl Standing {
    pub fn is_down(self) -> bool {
        self == Standing::Down
    }
}
