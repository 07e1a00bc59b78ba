//! The animation hook installed in the world.
//!
//! Headless hosts insert [`WaddleAnimator::headless`]; presentation hosts get
//! a [`PresentationAnimator`](crate::systems::presentation::PresentationAnimator)
//! installed by [`setup_presentation`](crate::resources::presentation::setup_presentation).

use bevy_ecs::prelude::{Entity, Resource};

use crate::waddle::animation::{AnimationCue, AnimationHook, HeadlessAnimation};

#[derive(Resource)]
pub struct WaddleAnimator {
    hook: Box<dyn AnimationHook + Send + Sync>,
}

impl WaddleAnimator {
    pub fn new(hook: impl AnimationHook + Send + Sync + 'static) -> Self {
        Self {
            hook: Box::new(hook),
        }
    }

    pub fn headless() -> Self {
        Self::new(HeadlessAnimation)
    }
}

impl Default for WaddleAnimator {
    fn default() -> Self {
        Self::headless()
    }
}

impl AnimationHook for WaddleAnimator {
    fn update_animation(&mut self, entity: Entity, waddling: bool, cue: &AnimationCue) {
        self.hook.update_animation(entity, waddling, cue);
    }

    fn forget(&mut self, entity: Entity) {
        self.hook.forget(entity);
    }
}
