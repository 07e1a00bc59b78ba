//! State transition controller.
//!
//! [`WaddleController`] is the single writer of
//! [`WaddleAnimation::is_waddling`]. Every request goes through
//! [`WaddleController::set_waddling`]:
//!
//! 1. Speculative replays of a tick are ignored (mutating there makes sprite
//!    rotation stutter while moving).
//! 2. Unforced starts are gated by [`GateQueries::can_waddle`].
//! 3. Requests that would not change the value are no-ops.
//! 4. Otherwise the field is written, dirty-marked for replication and the
//!    animation hook is invoked, once.
//!
//! [`GateQueries::can_waddle`]: crate::waddle::gate::GateQueries::can_waddle

use bevy_ecs::prelude::Entity;
use log::trace;

use crate::components::waddle::WaddleAnimation;
use crate::waddle::animation::AnimationHook;
use crate::waddle::host::WaddleHost;
use crate::waddle::router::{WaddleSignal, route};

/// Outcome of a [`WaddleController::set_waddling`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaddleTransition {
    /// Not the first-time-predicted tick; nothing happened.
    Skipped,
    /// The (gated) value already matched.
    Unchanged,
    /// The field was written to the contained value.
    Changed(bool),
}

impl WaddleTransition {
    pub fn is_changed(self) -> bool {
        matches!(self, WaddleTransition::Changed(_))
    }
}

/// Applies waddle requests against an injected host and animation hook.
pub struct WaddleController<'a, H: ?Sized, A: ?Sized> {
    host: &'a mut H,
    animator: &'a mut A,
}

impl<'a, H, A> WaddleController<'a, H, A>
where
    H: WaddleHost + ?Sized,
    A: AnimationHook + ?Sized,
{
    pub fn new(host: &'a mut H, animator: &'a mut A) -> Self {
        Self { host, animator }
    }

    pub fn can_waddle(&self, entity: Entity) -> bool {
        self.host.can_waddle(entity)
    }

    /// Enables or disables waddling for an entity, including the animation.
    /// Unless `force` is true, a start is refused for entities that fail the
    /// gate (dead, buckled, floating, ...).
    pub fn set_waddling(&mut self, entity: Entity, waddling: bool, force: bool) -> WaddleTransition {
        if !self.host.is_first_time_predicted() {
            return WaddleTransition::Skipped;
        }

        let waddling = waddling && (force || self.host.can_waddle(entity));

        if self.host.is_waddling(entity) == waddling {
            return WaddleTransition::Unchanged;
        }

        self.host.write_waddling(entity, waddling);
        self.host.dirty_field(entity, WaddleAnimation::IS_WADDLING);
        let cue = self.host.animation_cue(entity);
        self.animator.update_animation(entity, waddling, &cue);

        trace!("{:?} waddling -> {} (force: {})", entity, waddling, force);
        WaddleTransition::Changed(waddling)
    }

    pub fn stop_waddling(&mut self, entity: Entity) -> WaddleTransition {
        self.set_waddling(entity, false, true)
    }

    /// Route `signal` through the transition table and apply the result.
    /// Returns `None` when the table asks for no call.
    pub fn dispatch(&mut self, entity: Entity, signal: WaddleSignal) -> Option<WaddleTransition> {
        let request = route(signal)?;
        Some(self.set_waddling(entity, request.waddling, request.force))
    }
}
