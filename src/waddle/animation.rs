//! Animation side-effect hook.
//!
//! The controller calls [`AnimationHook::update_animation`] exactly once per
//! state change. Authoritative hosts plug in [`HeadlessAnimation`]; hosts
//! that draw sprites plug in something that actually plays a
//! [`WaddleClip`], such as
//! [`PresentationAnimator`](crate::systems::presentation::PresentationAnimator).

use bevy_ecs::prelude::Entity;
use serde::Serialize;

use crate::components::waddle::WaddleProfile;

/// Presentation details the host hands to the hook alongside a change.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationCue {
    pub profile: WaddleProfile,
    pub sprinting: bool,
}

/// Strategy invoked by the controller whenever `is_waddling` changes.
pub trait AnimationHook {
    fn update_animation(&mut self, entity: Entity, waddling: bool, cue: &AnimationCue);

    /// The entity lost its waddle component. Drop any per-entity state.
    fn forget(&mut self, _entity: Entity) {}
}

/// Hook for hosts without visual playback. Does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessAnimation;

impl AnimationHook for HeadlessAnimation {
    fn update_animation(&mut self, _entity: Entity, _waddling: bool, _cue: &AnimationCue) {}
}

/// One step of a waddle.
///
/// The sprite rotates from upright to `tumble_degrees` and hops to
/// `hop_offset` over the first half of the step, then returns to rest over
/// the second half.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WaddleClip {
    /// Seconds.
    pub length: f32,
    /// Peak rotation, in `[0, 360)` degrees.
    pub tumble_degrees: f32,
    pub hop_offset: (f32, f32),
}

impl WaddleClip {
    /// Build the clip for the next step. `left_step` picks the tilt side.
    pub fn for_step(cue: &AnimationCue, left_step: bool) -> Self {
        let profile = &cue.profile;
        let length = if cue.sprinting {
            profile.animation_length * profile.run_animation_length_multiplier
        } else {
            profile.animation_length
        };
        let tumble_degrees = if left_step {
            360.0 - profile.tumble_intensity
        } else {
            profile.tumble_intensity
        };
        Self {
            length,
            tumble_degrees,
            hop_offset: profile.hop_intensity,
        }
    }

    /// Sprite rotation (signed degrees, shortest arc) and offset at `t`
    /// seconds into the step. `t` is clamped to the clip.
    pub fn sample(&self, t: f32) -> (f32, (f32, f32)) {
        if self.length <= 0.0 {
            return (0.0, (0.0, 0.0));
        }
        let half = self.length / 2.0;
        let t = t.clamp(0.0, self.length);
        let weight = if t <= half {
            t / half
        } else {
            1.0 - (t - half) / half
        };
        let peak = shortest_arc(self.tumble_degrees);
        (
            peak * weight,
            (self.hop_offset.0 * weight, self.hop_offset.1 * weight),
        )
    }
}

/// Map an angle in degrees onto `(-180, 180]`.
fn shortest_arc(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
