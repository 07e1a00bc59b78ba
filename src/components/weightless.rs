//! Weightlessness marker.
//!
//! Present while the entity is not affected by gravity (no gravity generator,
//! open space, ...). The host inserts/removes it and raises a
//! [`GravityChangedEvent`](crate::events::gravity::GravityChangedEvent).

use bevy_ecs::prelude::Component;

/// Tag component: the entity is currently weightless.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Weightless;
