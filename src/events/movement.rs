//! Movement and posture events.
//!
//! Raised by the host's input and standing subsystems. The waddle observers
//! in [`crate::systems::waddle`] translate them into
//! [`WaddleSignal`](crate::waddle::router::WaddleSignal)s.

use bevy_ecs::prelude::*;

/// The held movement buttons of `entity` changed.
#[derive(Event, Debug, Clone, Copy)]
pub struct MoveInputEvent {
    pub entity: Entity,
    /// Whether any directional button is now held.
    pub has_directional_movement: bool,
}

/// `entity` got back up after being down.
#[derive(Event, Debug, Clone, Copy)]
pub struct StoodEvent {
    pub entity: Entity,
}

/// `entity` was knocked to the floor.
#[derive(Event, Debug, Clone, Copy)]
pub struct DownedEvent {
    pub entity: Entity,
}
