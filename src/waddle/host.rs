//! Host collaborator interfaces.
//!
//! The controller never reaches into global state. Everything it needs from
//! the hosting simulation is expressed here and injected at construction:
//! the gate queries ([`GateQueries`]), the tick authority
//! ([`TickAuthority`]) and the owner of the replicated field
//! ([`WaddleStore`]). [`WaddleHost`] bundles the three.

use bevy_ecs::prelude::Entity;

use crate::waddle::animation::AnimationCue;
use crate::waddle::gate::GateQueries;

/// Reports whether the current tick is the authoritative one.
pub trait TickAuthority {
    /// `true` on the first execution of a tick (and always on a host that
    /// never predicts), `false` on every speculative replay of it.
    fn is_first_time_predicted(&self) -> bool;
}

/// Storage of the replicated waddle field.
///
/// Only the controller calls the mutating methods. Callers must not route
/// an entity lacking the waddle component; implementations answer `false`
/// and ignore writes for such entities.
pub trait WaddleStore {
    fn is_waddling(&self, entity: Entity) -> bool;
    fn write_waddling(&mut self, entity: Entity, waddling: bool);
    /// Flag `field` of the waddle component for network replication.
    fn dirty_field(&mut self, entity: Entity, field: &'static str);
    /// Presentation details handed to the animation hook.
    fn animation_cue(&self, entity: Entity) -> AnimationCue;
}

/// Everything the controller needs from its host.
pub trait WaddleHost: GateQueries + TickAuthority + WaddleStore {}

impl<T> WaddleHost for T where T: GateQueries + TickAuthority + WaddleStore + ?Sized {}
