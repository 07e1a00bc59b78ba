//! Waddle Integration Tests
//!
//! Drive the observers registered by `register_waddle_observers` through a
//! real bevy_ecs world, the way the host subsystems would.
//!
//! # Test Categories
//!
//! 1. **Routing** - each host event reaches the controller with the right request
//! 2. **Gate** - starts refused for entities that cannot waddle
//! 3. **Tick gating** - speculative replays never mutate state
//! 4. **Replication** - dirty marks flushed as field deltas
//! 5. **Presentation** - play/stop commands reach the presentation thread
//!
//! ```sh
//! cargo test --test waddle_integration
//! ```

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;

use waddle::components::buckled::Buckled;
use waddle::components::gridmember::GridMember;
use waddle::components::inputmover::{InputMover, MoveButtons};
use waddle::components::mobstate::MobState;
use waddle::components::standing::Standing;
use waddle::components::waddle::WaddleAnimation;
use waddle::events::movement::{MoveInputEvent, StoodEvent};
use waddle::events::replication::FieldDelta;
use waddle::events::status::{MobStateChangedEvent, StunnedEvent};
use waddle::resources::animator::WaddleAnimator;
use waddle::resources::dirtyfields::DirtyFields;
use waddle::resources::presentation::{setup_presentation, shutdown_presentation};
use waddle::simulation::{HostAction, HostFixtures};
use waddle::systems::replication::flush_dirty_fields;
use waddle::systems::time::{start_replay, start_tick};
use waddle::systems::waddle::register_waddle_observers;
use waddle::waddle::animation::{AnimationCue, AnimationHook};

// =============================================================================
// Helpers
// =============================================================================

type Calls = Arc<Mutex<Vec<(Entity, bool)>>>;

/// Animation hook that records every call.
struct RecordingHook(Calls);

impl AnimationHook for RecordingHook {
    fn update_animation(&mut self, entity: Entity, waddling: bool, _cue: &AnimationCue) {
        self.0.lock().unwrap().push((entity, waddling));
    }
}

struct Fixture {
    world: World,
    fixtures: HostFixtures,
    calls: Calls,
}

impl Fixture {
    fn new() -> Self {
        let mut world = World::new();
        let calls = Calls::default();
        world.insert_resource(WaddleAnimator::new(RecordingHook(calls.clone())));
        register_waddle_observers(&mut world);
        let grid = world.spawn_empty().id();
        let strap = world.spawn_empty().id();
        start_tick(&mut world, 1);
        Fixture {
            world,
            fixtures: HostFixtures { grid, strap },
            calls,
        }
    }

    fn spawn(&mut self, buttons: MoveButtons) -> Entity {
        self.world
            .spawn((
                WaddleAnimation::default(),
                MobState::Alive,
                Standing::Upright,
                GridMember::on(self.fixtures.grid),
                InputMover::new(buttons),
            ))
            .id()
    }

    fn spawn_waddling(&mut self) -> Entity {
        let entity = self.spawn(MoveButtons::UP);
        assert!(self.waddling(entity));
        self.reset_counters();
        entity
    }

    fn act(&mut self, entity: Entity, action: HostAction) {
        action.apply(&mut self.world, entity, self.fixtures);
    }

    fn waddling(&self, entity: Entity) -> bool {
        self.world.get::<WaddleAnimation>(entity).unwrap().is_waddling
    }

    fn marks(&self) -> u64 {
        self.world.resource::<DirtyFields>().total_marks()
    }

    fn calls(&self) -> Vec<(Entity, bool)> {
        self.calls.lock().unwrap().clone()
    }

    fn reset_counters(&mut self) {
        self.world.insert_resource(DirtyFields::default());
        self.calls.lock().unwrap().clear();
    }
}

// =============================================================================
// Routing
// =============================================================================

#[test]
fn attached_while_moving_starts_waddling() {
    let mut fx = Fixture::new();
    let entity = fx.spawn(MoveButtons::LEFT);

    assert!(fx.waddling(entity));
    assert_eq!(fx.marks(), 1);
    assert_eq!(fx.calls(), vec![(entity, true)]);
}

#[test]
fn attached_while_idle_stays_still() {
    let mut fx = Fixture::new();
    let entity = fx.spawn(MoveButtons::empty());

    assert!(!fx.waddling(entity));
    assert_eq!(fx.marks(), 0);
    assert!(fx.calls().is_empty());
}

#[test]
fn attached_without_input_mover_does_nothing() {
    let mut fx = Fixture::new();
    let entity = fx
        .world
        .spawn((
            WaddleAnimation::default(),
            MobState::Alive,
            GridMember::on(fx.fixtures.grid),
        ))
        .id();

    assert!(!fx.waddling(entity));
    assert_eq!(fx.marks(), 0);
}

#[test]
fn stun_forces_stop() {
    let mut fx = Fixture::new();
    let entity = fx.spawn_waddling();

    fx.world.trigger(StunnedEvent { entity });

    assert!(!fx.waddling(entity));
    assert_eq!(fx.marks(), 1);
    assert_eq!(fx.calls(), vec![(entity, false)]);
}

#[test]
fn standing_up_while_idle_changes_nothing() {
    let mut fx = Fixture::new();
    let entity = fx.spawn(MoveButtons::empty());

    fx.world.trigger(StoodEvent { entity });

    assert!(!fx.waddling(entity));
    assert_eq!(fx.marks(), 0);
}

#[test]
fn standing_up_while_moving_resumes() {
    let mut fx = Fixture::new();
    let entity = fx.spawn_waddling();

    fx.act(entity, HostAction::KnockDown);
    assert!(!fx.waddling(entity));

    fx.act(entity, HostAction::StandUp);
    assert!(fx.waddling(entity));
    assert_eq!(fx.calls(), vec![(entity, false), (entity, true)]);
}

#[test]
fn knocked_down_cannot_start() {
    let mut fx = Fixture::new();
    let entity = fx.spawn(MoveButtons::empty());

    fx.act(entity, HostAction::KnockDown);
    fx.act(entity, HostAction::Move(MoveButtons::RIGHT));

    assert!(!fx.waddling(entity));
}

#[test]
fn gravity_restore_does_not_resume() {
    let mut fx = Fixture::new();
    let entity = fx.spawn_waddling();

    fx.act(entity, HostAction::LoseGravity);
    assert!(!fx.waddling(entity));

    fx.act(entity, HostAction::RestoreGravity);
    assert!(!fx.waddling(entity));
    assert_eq!(fx.marks(), 1);

    fx.act(entity, HostAction::Move(MoveButtons::DOWN));
    assert!(fx.waddling(entity));
}

#[test]
fn weightless_entity_cannot_start() {
    let mut fx = Fixture::new();
    let entity = fx.spawn(MoveButtons::empty());

    fx.act(entity, HostAction::LoseGravity);
    fx.act(entity, HostAction::Move(MoveButtons::UP));

    assert!(!fx.waddling(entity));
}

#[test]
fn buckle_forces_stop_and_unbuckle_does_not_resume() {
    let mut fx = Fixture::new();
    let entity = fx.spawn_waddling();

    fx.act(entity, HostAction::Buckle);
    assert!(!fx.waddling(entity));
    assert!(fx.world.get::<Buckled>(entity).is_some());

    fx.act(entity, HostAction::Move(MoveButtons::UP));
    assert!(!fx.waddling(entity));

    fx.act(entity, HostAction::Unbuckle);
    assert!(!fx.waddling(entity));
    fx.act(entity, HostAction::Move(MoveButtons::LEFT));
    assert!(fx.waddling(entity));
}

#[test]
fn death_stops_and_revive_does_not_resume() {
    let mut fx = Fixture::new();
    let entity = fx.spawn_waddling();

    fx.act(entity, HostAction::Kill);
    assert!(!fx.waddling(entity));

    fx.act(entity, HostAction::Move(MoveButtons::UP));
    assert!(!fx.waddling(entity));

    fx.act(entity, HostAction::Revive);
    assert!(!fx.waddling(entity));

    fx.act(entity, HostAction::Move(MoveButtons::UP));
    assert!(fx.waddling(entity));
}

#[test]
fn recovery_to_alive_still_stops() {
    let mut fx = Fixture::new();
    let entity = fx.spawn_waddling();

    fx.world.trigger(MobStateChangedEvent {
        entity,
        old: MobState::Critical,
        new: MobState::Alive,
    });

    assert!(!fx.waddling(entity));
    assert_eq!(fx.marks(), 1);
    assert_eq!(fx.calls(), vec![(entity, false)]);

    fx.act(entity, HostAction::Move(MoveButtons::UP));
    assert!(fx.waddling(entity));
}

#[test]
fn off_grid_entity_cannot_start() {
    let mut fx = Fixture::new();
    let entity = fx.spawn(MoveButtons::empty());

    fx.act(entity, HostAction::LeaveGrid);
    fx.act(entity, HostAction::Move(MoveButtons::UP));
    assert!(!fx.waddling(entity));

    fx.act(entity, HostAction::EnterGrid);
    fx.act(entity, HostAction::Move(MoveButtons::UP));
    assert!(fx.waddling(entity));
}

#[test]
fn blocked_entity_cannot_start() {
    let mut fx = Fixture::new();
    let entity = fx.spawn(MoveButtons::empty());

    fx.act(entity, HostAction::BlockMovement);
    fx.act(entity, HostAction::Move(MoveButtons::UP));

    assert!(!fx.waddling(entity));
}

#[test]
fn stopping_movement_stops_waddling() {
    let mut fx = Fixture::new();
    let entity = fx.spawn_waddling();

    fx.act(entity, HostAction::StopMoving);

    assert!(!fx.waddling(entity));
    assert_eq!(fx.calls(), vec![(entity, false)]);
}

#[test]
fn walk_modifier_alone_is_not_movement() {
    let mut fx = Fixture::new();
    let entity = fx.spawn(MoveButtons::empty());

    fx.act(entity, HostAction::Move(MoveButtons::WALK));

    assert!(!fx.waddling(entity));
}

#[test]
fn entities_without_waddle_component_are_ignored() {
    let mut fx = Fixture::new();
    let bystander = fx
        .world
        .spawn((MobState::Alive, InputMover::new(MoveButtons::UP)))
        .id();

    fx.world.trigger(MoveInputEvent {
        entity: bystander,
        has_directional_movement: true,
    });
    fx.act(bystander, HostAction::Stun);

    assert_eq!(fx.marks(), 0);
    assert!(fx.calls().is_empty());
}

#[test]
fn repeated_stops_mark_dirty_once() {
    let mut fx = Fixture::new();
    let entity = fx.spawn_waddling();

    fx.act(entity, HostAction::Stun);
    fx.act(entity, HostAction::Stun);
    fx.act(entity, HostAction::KnockDown);

    assert_eq!(fx.marks(), 1);
    assert_eq!(fx.calls().len(), 1);
}

// =============================================================================
// Tick gating
// =============================================================================

#[test]
fn replays_never_mutate() {
    let mut fx = Fixture::new();
    let entity = fx.spawn(MoveButtons::empty());

    start_tick(&mut fx.world, 2);
    start_replay(&mut fx.world);
    fx.act(entity, HostAction::Move(MoveButtons::UP));
    assert!(!fx.waddling(entity));

    start_tick(&mut fx.world, 3);
    fx.act(entity, HostAction::Move(MoveButtons::UP));
    assert!(fx.waddling(entity));

    start_replay(&mut fx.world);
    fx.act(entity, HostAction::Stun);
    assert!(fx.waddling(entity));
    assert_eq!(fx.marks(), 1);
}

// =============================================================================
// Replication
// =============================================================================

#[test]
fn flush_emits_current_value_once() {
    let mut fx = Fixture::new();
    fx.world.init_resource::<Messages<FieldDelta>>();
    let entity = fx.spawn(MoveButtons::empty());

    start_tick(&mut fx.world, 5);
    fx.act(entity, HostAction::Move(MoveButtons::UP));
    fx.act(entity, HostAction::Stun);
    let mut schedule = Schedule::default();
    schedule.add_systems(flush_dirty_fields);
    schedule.run(&mut fx.world);

    let deltas: Vec<FieldDelta> = {
        let mut state = SystemState::<MessageReader<FieldDelta>>::new(&mut fx.world);
        let mut reader = state.get_mut(&mut fx.world);
        reader.read().cloned().collect()
    };
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].tick, 5);
    assert_eq!(deltas[0].entity, entity.to_bits());
    assert_eq!(deltas[0].field, WaddleAnimation::IS_WADDLING);
    assert!(!deltas[0].value);
    assert!(fx.world.resource::<DirtyFields>().is_empty());
}

// =============================================================================
// Presentation
// =============================================================================

#[test]
fn presentation_thread_sees_play_and_stop() {
    let mut world = World::new();
    setup_presentation(&mut world);
    register_waddle_observers(&mut world);
    let grid = world.spawn_empty().id();
    let fixtures = HostFixtures { grid, strap: grid };

    let entity = world
        .spawn((
            WaddleAnimation::default(),
            MobState::Alive,
            GridMember::on(grid),
            InputMover::new(MoveButtons::UP),
        ))
        .id();
    HostAction::Stun.apply(&mut world, entity, fixtures);
    HostAction::Move(MoveButtons::RIGHT).apply(&mut world, entity, fixtures);

    let despawned = world
        .spawn((
            WaddleAnimation::default(),
            MobState::Alive,
            GridMember::on(grid),
            InputMover::new(MoveButtons::LEFT),
        ))
        .id();
    world.despawn(despawned);

    let stats = shutdown_presentation(&mut world).unwrap();
    assert_eq!(stats.clips_started, 3);
    assert_eq!(stats.clips_stopped, 2);
    assert_eq!(stats.active_at_shutdown, 1);
    assert!(shutdown_presentation(&mut world).is_none());
}
