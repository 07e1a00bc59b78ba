//! Status events that stop a waddle.

use bevy_ecs::prelude::*;

use crate::components::mobstate::MobState;

/// `entity` was stunned.
#[derive(Event, Debug, Clone, Copy)]
pub struct StunnedEvent {
    pub entity: Entity,
}

/// `entity` was buckled to `strap`.
#[derive(Event, Debug, Clone, Copy)]
pub struct BuckledEvent {
    pub entity: Entity,
    pub strap: Entity,
}

/// The vitality of `entity` changed from `old` to `new`.
#[derive(Event, Debug, Clone, Copy)]
pub struct MobStateChangedEvent {
    pub entity: Entity,
    pub old: MobState,
    pub new: MobState,
}
