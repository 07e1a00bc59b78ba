//! Waddle animation state component.
//!
//! [`WaddleAnimation`] is attached to every entity that can waddle. It owns a
//! single replicated boolean, [`WaddleAnimation::is_waddling`], plus a
//! read-only [`WaddleProfile`] describing how the presentation layer should
//! animate the waddle.
//!
//! The only writer of `is_waddling` is the
//! [`WaddleController`](crate::waddle::controller::WaddleController). Every
//! write is paired with a dirty mark on [`WaddleAnimation::IS_WADDLING`] so
//! that the replication layer ships the new value to observers.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Default hop offset at the top of a step, in world units.
pub const DEFAULT_HOP_INTENSITY: (f32, f32) = (0.0, 0.125);
/// Default sprite tilt at the top of a step, in degrees.
pub const DEFAULT_TUMBLE_INTENSITY: f32 = 20.0;
/// Default duration of one step, in seconds.
pub const DEFAULT_ANIMATION_LENGTH: f32 = 0.66;
/// Default step length multiplier applied while sprinting.
pub const DEFAULT_RUN_ANIMATION_LENGTH_MULTIPLIER: f32 = 0.568;

/// How a waddle looks. Consumed by presentation hooks only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaddleProfile {
    /// Sprite offset at the top of a hop.
    pub hop_intensity: (f32, f32),
    /// Sprite rotation at the top of a hop, in degrees.
    pub tumble_intensity: f32,
    /// Length of a walking step, in seconds.
    pub animation_length: f32,
    /// Multiplier for `animation_length` while sprinting.
    pub run_animation_length_multiplier: f32,
}

impl Default for WaddleProfile {
    fn default() -> Self {
        Self {
            hop_intensity: DEFAULT_HOP_INTENSITY,
            tumble_intensity: DEFAULT_TUMBLE_INTENSITY,
            animation_length: DEFAULT_ANIMATION_LENGTH,
            run_animation_length_multiplier: DEFAULT_RUN_ANIMATION_LENGTH_MULTIPLIER,
        }
    }
}

/// Replicated waddle state of an entity.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct WaddleAnimation {
    /// Whether the entity is currently waddling. Starts as `false`.
    pub is_waddling: bool,
    pub profile: WaddleProfile,
}

impl WaddleAnimation {
    /// Component name used on the replication wire.
    pub const COMPONENT: &'static str = "WaddleAnimation";
    /// Field name used for dirty marks and replication deltas.
    pub const IS_WADDLING: &'static str = "is_waddling";

    /// Create a non-waddling component with the given profile.
    pub fn new(profile: WaddleProfile) -> Self {
        Self {
            is_waddling: false,
            profile,
        }
    }
}
