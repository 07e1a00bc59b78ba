//! Gravity change event.
//!
//! Raised when an entity enters or leaves a gravity field. Only the loss of
//! gravity is interesting to the waddle router; getting gravity back does not
//! restart a waddle.

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy)]
pub struct GravityChangedEvent {
    pub entity: Entity,
    pub has_gravity: bool,
}
