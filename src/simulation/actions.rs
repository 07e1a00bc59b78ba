//! Host-side actions.
//!
//! The simulation plays the part of every subsystem the waddle controller
//! depends on. A [`HostAction`] changes one attribute of an entity exactly
//! the way the owning subsystem would, then raises the event that subsystem
//! raises (if any). Actions set absolute values, so applying one again during
//! a replay of the same tick leaves the attributes unchanged.

use bevy_ecs::prelude::*;

use crate::components::buckled::Buckled;
use crate::components::gridmember::GridMember;
use crate::components::inputmover::{InputMover, MoveButtons};
use crate::components::mobstate::MobState;
use crate::components::movementblocked::MovementBlocked;
use crate::components::standing::Standing;
use crate::components::weightless::Weightless;
use crate::events::gravity::GravityChangedEvent;
use crate::events::movement::{DownedEvent, MoveInputEvent, StoodEvent};
use crate::events::status::{BuckledEvent, MobStateChangedEvent, StunnedEvent};

const DIRECTIONS: [MoveButtons; 4] = [
    MoveButtons::UP,
    MoveButtons::DOWN,
    MoveButtons::LEFT,
    MoveButtons::RIGHT,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostAction {
    Move(MoveButtons),
    StopMoving,
    Stun,
    KnockDown,
    StandUp,
    Buckle,
    Unbuckle,
    Kill,
    Revive,
    LoseGravity,
    RestoreGravity,
    LeaveGrid,
    EnterGrid,
    BlockMovement,
    UnblockMovement,
}

/// Entities shared by all actions of a simulation.
#[derive(Clone, Copy, Debug)]
pub struct HostFixtures {
    /// The grid every waddler starts on.
    pub grid: Entity,
    /// The chair buckles attach to.
    pub strap: Entity,
}

impl HostAction {
    /// Pick a random action. Movement changes dominate, like real input.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        match rng.u8(0..24) {
            0..=5 => {
                let mut buttons = DIRECTIONS[rng.usize(..DIRECTIONS.len())];
                if rng.bool() {
                    buttons = buttons | MoveButtons::WALK;
                }
                HostAction::Move(buttons)
            }
            6..=9 => HostAction::StopMoving,
            10 => HostAction::Stun,
            11 => HostAction::KnockDown,
            12 | 13 => HostAction::StandUp,
            14 => HostAction::Buckle,
            15 => HostAction::Unbuckle,
            16 => HostAction::Kill,
            17 => HostAction::Revive,
            18 => HostAction::LoseGravity,
            19 => HostAction::RestoreGravity,
            20 => HostAction::LeaveGrid,
            21 => HostAction::EnterGrid,
            22 => HostAction::BlockMovement,
            _ => HostAction::UnblockMovement,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HostAction::Move(_) => "move",
            HostAction::StopMoving => "stop_moving",
            HostAction::Stun => "stun",
            HostAction::KnockDown => "knock_down",
            HostAction::StandUp => "stand_up",
            HostAction::Buckle => "buckle",
            HostAction::Unbuckle => "unbuckle",
            HostAction::Kill => "kill",
            HostAction::Revive => "revive",
            HostAction::LoseGravity => "lose_gravity",
            HostAction::RestoreGravity => "restore_gravity",
            HostAction::LeaveGrid => "leave_grid",
            HostAction::EnterGrid => "enter_grid",
            HostAction::BlockMovement => "block_movement",
            HostAction::UnblockMovement => "unblock_movement",
        }
    }

    /// Apply the attribute change to `entity` and raise the matching event.
    pub fn apply(self, world: &mut World, entity: Entity, fixtures: HostFixtures) {
        if world.get_entity(entity).is_err() {
            return;
        }
        match self {
            HostAction::Move(buttons) => {
                world.entity_mut(entity).insert(InputMover::new(buttons));
                world.trigger(MoveInputEvent {
                    entity,
                    has_directional_movement: buttons.intersects(MoveButtons::ANY_DIRECTION),
                });
            }
            HostAction::StopMoving => {
                world.entity_mut(entity).insert(InputMover::default());
                world.trigger(MoveInputEvent {
                    entity,
                    has_directional_movement: false,
                });
            }
            HostAction::Stun => {
                world.trigger(StunnedEvent { entity });
            }
            HostAction::KnockDown => {
                world.entity_mut(entity).insert(Standing::Down);
                world.trigger(DownedEvent { entity });
            }
            HostAction::StandUp => {
                world.entity_mut(entity).insert(Standing::Upright);
                world.trigger(StoodEvent { entity });
            }
            HostAction::Buckle => {
                world.entity_mut(entity).insert(Buckled::new(fixtures.strap));
                world.trigger(BuckledEvent {
                    entity,
                    strap: fixtures.strap,
                });
            }
            HostAction::Unbuckle => {
                world.entity_mut(entity).remove::<Buckled>();
            }
            HostAction::Kill => set_mob_state(world, entity, MobState::Dead),
            HostAction::Revive => set_mob_state(world, entity, MobState::Alive),
            HostAction::LoseGravity => {
                world.entity_mut(entity).insert(Weightless);
                world.trigger(GravityChangedEvent {
                    entity,
                    has_gravity: false,
                });
            }
            HostAction::RestoreGravity => {
                world.entity_mut(entity).remove::<Weightless>();
                world.trigger(GravityChangedEvent {
                    entity,
                    has_gravity: true,
                });
            }
            HostAction::LeaveGrid => {
                world.entity_mut(entity).insert(GridMember::space());
            }
            HostAction::EnterGrid => {
                world.entity_mut(entity).insert(GridMember::on(fixtures.grid));
            }
            HostAction::BlockMovement => {
                world.entity_mut(entity).insert(MovementBlocked);
            }
            HostAction::UnblockMovement => {
                world.entity_mut(entity).remove::<MovementBlocked>();
            }
        }
    }
}

fn set_mob_state(world: &mut World, entity: Entity, new: MobState) {
    let Some(mut state) = world.get_mut::<MobState>(entity) else {
        return;
    };
    let old = *state;
    if old == new {
        return;
    }
    *state = new;
    world.trigger(MobStateChangedEvent { entity, old, new });
}
