//! bevy_ecs binding of the waddle controller.
//!
//! [`WaddleParams`] exposes the world to the engine-agnostic
//! [`WaddleController`] by implementing its host traits over ECS queries and
//! resources. The observers in this module form the event router: each one
//! turns a host event into a [`WaddleSignal`] and dispatches it.
//!
//! Observers are registered globally. Entities without a
//! [`WaddleAnimation`] are outside the subscription and are ignored.
//!
//! # Example
//!
//! ```ignore
//! let mut world = World::new();
//! register_waddle_observers(&mut world);
//! let e = world.spawn((WaddleAnimation::default(), MobState::Alive, GridMember::on(grid))).id();
//! world.trigger(MoveInputEvent { entity: e, has_directional_movement: true });
//! ```

use bevy_ecs::lifecycle::{Add, Remove};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::debug;

use crate::components::buckled::Buckled;
use crate::components::gridmember::GridMember;
use crate::components::inputmover::InputMover;
use crate::components::mobstate::MobState;
use crate::components::movementblocked::MovementBlocked;
use crate::components::standing::Standing;
use crate::components::waddle::WaddleAnimation;
use crate::components::weightless::Weightless;
use crate::events::gravity::GravityChangedEvent;
use crate::events::movement::{DownedEvent, MoveInputEvent, StoodEvent};
use crate::events::status::{BuckledEvent, MobStateChangedEvent, StunnedEvent};
use crate::resources::animator::WaddleAnimator;
use crate::resources::dirtyfields::DirtyFields;
use crate::resources::gametiming::GameTiming;
use crate::waddle::animation::{AnimationCue, AnimationHook};
use crate::waddle::controller::{WaddleController, WaddleTransition};
use crate::waddle::gate::GateQueries;
use crate::waddle::host::{TickAuthority, WaddleStore};
use crate::waddle::router::WaddleSignal;

/// Queries and resources the controller reads and writes.
#[derive(SystemParam)]
pub struct WaddleParams<'w, 's> {
    pub timing: Res<'w, GameTiming>,
    pub dirty: ResMut<'w, DirtyFields>,
    pub waddlers: Query<'w, 's, &'static mut WaddleAnimation>,
    pub mob_states: Query<'w, 's, &'static MobState>,
    pub weightless: Query<'w, 's, (), With<Weightless>>,
    pub blocked: Query<'w, 's, (), With<MovementBlocked>>,
    pub buckled: Query<'w, 's, (), With<Buckled>>,
    pub standing: Query<'w, 's, &'static Standing>,
    pub grids: Query<'w, 's, &'static GridMember>,
    pub movers: Query<'w, 's, &'static InputMover>,
}

impl GateQueries for WaddleParams<'_, '_> {
    fn is_alive(&self, entity: Entity) -> bool {
        self.mob_states
            .get(entity)
            .is_ok_and(|state| state.is_alive())
    }

    fn is_weightless(&self, entity: Entity) -> bool {
        self.weightless.contains(entity)
    }

    fn can_move(&self, entity: Entity) -> bool {
        !self.blocked.contains(entity)
    }

    fn is_buckled(&self, entity: Entity) -> bool {
        self.buckled.contains(entity)
    }

    fn is_down(&self, entity: Entity) -> bool {
        self.standing
            .get(entity)
            .is_ok_and(|standing| standing.is_down())
    }

    fn grid(&self, entity: Entity) -> Option<Entity> {
        self.grids.get(entity).ok().and_then(|member| member.grid)
    }
}

impl TickAuthority for WaddleParams<'_, '_> {
    fn is_first_time_predicted(&self) -> bool {
        self.timing.is_first_time_predicted()
    }
}

impl WaddleStore for WaddleParams<'_, '_> {
    fn is_waddling(&self, entity: Entity) -> bool {
        self.waddlers
            .get(entity)
            .is_ok_and(|waddle| waddle.is_waddling)
    }

    fn write_waddling(&mut self, entity: Entity, waddling: bool) {
        match self.waddlers.get_mut(entity) {
            Ok(mut waddle) => waddle.is_waddling = waddling,
            Err(_) => debug_assert!(false, "{entity:?} routed without WaddleAnimation"),
        }
    }

    fn dirty_field(&mut self, entity: Entity, field: &'static str) {
        self.dirty.mark(entity, field);
    }

    fn animation_cue(&self, entity: Entity) -> AnimationCue {
        AnimationCue {
            profile: self
                .waddlers
                .get(entity)
                .map(|waddle| waddle.profile)
                .unwrap_or_default(),
            sprinting: self
                .movers
                .get(entity)
                .is_ok_and(|mover| mover.is_sprinting()),
        }
    }
}

impl WaddleParams<'_, '_> {
    /// Held directional intent, `None` for entities without an input mover.
    pub fn held_directional_movement(&self, entity: Entity) -> Option<bool> {
        self.movers
            .get(entity)
            .ok()
            .map(|mover| mover.has_directional_movement())
    }
}

/// Route `signal` for `entity` through a controller built from the world.
fn dispatch_signal(
    host: &mut WaddleParams,
    animator: &mut WaddleAnimator,
    entity: Entity,
    signal: WaddleSignal,
) {
    if !host.waddlers.contains(entity) {
        return;
    }
    let transition = WaddleController::new(host, animator).dispatch(entity, signal);
    if transition.is_some_and(WaddleTransition::is_changed) {
        debug!("{:?}: {:?} -> {:?}", entity, signal, transition);
    }
}

/// Start waddling right away if the entity is already moving when the
/// component is attached.
pub fn on_waddle_added(
    add: On<Add, WaddleAnimation>,
    mut host: WaddleParams,
    mut animator: ResMut<WaddleAnimator>,
) {
    let entity = add.event().entity;
    let Some(moving) = host.held_directional_movement(entity) else {
        return;
    };
    dispatch_signal(&mut host, &mut animator, entity, WaddleSignal::Startup { moving });
}

/// Release animation state kept for an entity that stops being a waddler.
pub fn on_waddle_removed(remove: On<Remove, WaddleAnimation>, mut animator: ResMut<WaddleAnimator>) {
    animator.forget(remove.event().entity);
}

/// Only waddle while actually moving.
pub fn on_move_input(
    trigger: On<MoveInputEvent>,
    mut host: WaddleParams,
    mut animator: ResMut<WaddleAnimator>,
) {
    let event = *trigger.event();
    dispatch_signal(
        &mut host,
        &mut animator,
        event.entity,
        WaddleSignal::MoveInput {
            has_directional_movement: event.has_directional_movement,
        },
    );
}

pub fn on_stood(trigger: On<StoodEvent>, mut host: WaddleParams, mut animator: ResMut<WaddleAnimator>) {
    let entity = trigger.event().entity;
    let Some(moving) = host.held_directional_movement(entity) else {
        return;
    };
    dispatch_signal(&mut host, &mut animator, entity, WaddleSignal::Stood { moving });
}

pub fn on_stunned(
    trigger: On<StunnedEvent>,
    mut host: WaddleParams,
    mut animator: ResMut<WaddleAnimator>,
) {
    let entity = trigger.event().entity;
    dispatch_signal(&mut host, &mut animator, entity, WaddleSignal::Stunned);
}

pub fn on_downed(trigger: On<DownedEvent>, mut host: WaddleParams, mut animator: ResMut<WaddleAnimator>) {
    let entity = trigger.event().entity;
    dispatch_signal(&mut host, &mut animator, entity, WaddleSignal::Downed);
}

pub fn on_buckled(
    trigger: On<BuckledEvent>,
    mut host: WaddleParams,
    mut animator: ResMut<WaddleAnimator>,
) {
    let entity = trigger.event().entity;
    dispatch_signal(&mut host, &mut animator, entity, WaddleSignal::Buckled);
}

pub fn on_mob_state_changed(
    trigger: On<MobStateChangedEvent>,
    mut host: WaddleParams,
    mut animator: ResMut<WaddleAnimator>,
) {
    let entity = trigger.event().entity;
    dispatch_signal(&mut host, &mut animator, entity, WaddleSignal::MobStateChanged);
}

pub fn on_gravity_changed(
    trigger: On<GravityChangedEvent>,
    mut host: WaddleParams,
    mut animator: ResMut<WaddleAnimator>,
) {
    let event = *trigger.event();
    dispatch_signal(
        &mut host,
        &mut animator,
        event.entity,
        WaddleSignal::GravityChanged {
            has_gravity: event.has_gravity,
        },
    );
}

/// Install the waddle observers and the resources they need.
///
/// Existing [`GameTiming`], [`DirtyFields`] and [`WaddleAnimator`] resources
/// are kept; missing ones are created with defaults (headless animator).
pub fn register_waddle_observers(world: &mut World) {
    world.init_resource::<GameTiming>();
    world.init_resource::<DirtyFields>();
    world.init_resource::<WaddleAnimator>();

    world.add_observer(on_waddle_added);
    world.add_observer(on_waddle_removed);
    world.add_observer(on_move_input);
    world.add_observer(on_stood);
    world.add_observer(on_stunned);
    world.add_observer(on_downed);
    world.add_observer(on_buckled);
    world.add_observer(on_mob_state_changed);
    world.add_observer(on_gravity_changed);
    world.flush();
}
