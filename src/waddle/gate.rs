//! Waddle gate: may this entity waddle right now?
//!
//! The gate is a total boolean predicate over six independent attributes
//! owned by other subsystems. [`GateQueries`] is the host-facing side (one
//! query per attribute, plus the provided [`GateQueries::can_waddle`]);
//! [`GateSnapshot`] is a plain value copy of the same attributes, used for
//! diagnostics and for exhaustive testing.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Entity;
use serde::Serialize;

/// Number of conditions the gate checks.
pub const GATE_CONDITIONS: usize = 6;

/// A reason the gate refuses to let an entity waddle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum GateCondition {
    NotAlive,
    Weightless,
    CannotMove,
    Buckled,
    Down,
    NoGrid,
}

/// Read-only attribute queries the gate needs from the host.
///
/// Implementations must be side-effect free; the controller may call them
/// any number of times per tick.
pub trait GateQueries {
    fn is_alive(&self, entity: Entity) -> bool;
    fn is_weightless(&self, entity: Entity) -> bool;
    fn can_move(&self, entity: Entity) -> bool;
    fn is_buckled(&self, entity: Entity) -> bool;
    fn is_down(&self, entity: Entity) -> bool;
    /// The grid the entity stands on, `None` in open space.
    fn grid(&self, entity: Entity) -> Option<Entity>;

    /// Returns true if an entity is allowed to waddle at all.
    fn can_waddle(&self, entity: Entity) -> bool {
        self.is_alive(entity)
            && !self.is_weightless(entity)
            && self.can_move(entity)
            && !self.is_buckled(entity)
            && !self.is_down(entity)
            && self.grid(entity).is_some()
    }
}

/// Value copy of every attribute the gate looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GateSnapshot {
    pub alive: bool,
    pub weightless: bool,
    pub can_move: bool,
    pub buckled: bool,
    pub down: bool,
    pub on_grid: bool,
}

impl Default for GateSnapshot {
    /// A healthy, upright, free entity standing on a grid.
    fn default() -> Self {
        Self {
            alive: true,
            weightless: false,
            can_move: true,
            buckled: false,
            down: false,
            on_grid: true,
        }
    }
}

impl GateSnapshot {
    /// Read all six attributes of `entity` from the host.
    pub fn capture<Q: GateQueries + ?Sized>(queries: &Q, entity: Entity) -> Self {
        Self {
            alive: queries.is_alive(entity),
            weightless: queries.is_weightless(entity),
            can_move: queries.can_move(entity),
            buckled: queries.is_buckled(entity),
            down: queries.is_down(entity),
            on_grid: queries.grid(entity).is_some(),
        }
    }

    pub fn allows_waddle(&self) -> bool {
        self.blocking_conditions().is_empty()
    }

    /// Every failed condition, in evaluation order.
    pub fn blocking_conditions(&self) -> ArrayVec<GateCondition, GATE_CONDITIONS> {
        let mut blocked = ArrayVec::new();
        if !self.alive {
            blocked.push(GateCondition::NotAlive);
        }
        if self.weightless {
            blocked.push(GateCondition::Weightless);
        }
        if !self.can_move {
            blocked.push(GateCondition::CannotMove);
        }
        if self.buckled {
            blocked.push(GateCondition::Buckled);
        }
        if self.down {
            blocked.push(GateCondition::Down);
        }
        if !self.on_grid {
            blocked.push(GateCondition::NoGrid);
        }
        blocked
    }
}

/// A snapshot answers the same for every entity. Handy for tests and for
/// hosts that evaluate one entity at a time.
impl GateQueries for GateSnapshot {
    fn is_alive(&self, _entity: Entity) -> bool {
        self.alive
    }
    fn is_weightless(&self, _entity: Entity) -> bool {
        self.weightless
    }
    fn can_move(&self, _entity: Entity) -> bool {
        self.can_move
    }
    fn is_buckled(&self, _entity: Entity) -> bool {
        self.buckled
    }
    fn is_down(&self, _entity: Entity) -> bool {
        self.down
    }
    fn grid(&self, entity: Entity) -> Option<Entity> {
        // Any entity id works; only presence matters to the gate.
        self.on_grid.then_some(entity)
    }
}
