//! Vitality of a mob.
//!
//! Owned by the host's health subsystem. The waddle gate only asks whether
//! the entity is [`MobState::Alive`]; an entity without a `MobState` is never
//! considered alive.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MobState {
    #[default]
    Alive,
    Critical,
    Dead,
}

impl MobState {
    pub fn is_alive(self) -> bool {
        self == MobState::Alive
    }
}
