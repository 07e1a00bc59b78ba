//! Tick advancement.
//!
//! Drives the [`GameTiming`](crate::resources::gametiming::GameTiming)
//! resource from the simulation loop. Called with exclusive world access
//! between passes, never from inside a schedule.
use bevy_ecs::prelude::*;

use crate::resources::gametiming::GameTiming;

/// Begin the first-predicted pass of `tick`.
pub fn start_tick(world: &mut World, tick: u64) {
    world.resource_mut::<GameTiming>().start_tick(tick);
}

/// Begin a speculative replay of the current tick.
pub fn start_replay(world: &mut World) {
    world.resource_mut::<GameTiming>().start_replay();
}
