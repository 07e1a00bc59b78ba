//! Bridge between the ECS world and the presentation thread.
//!
//! Use [`setup_presentation`] once during initialization of a host that can
//! draw; it spawns the thread and installs a
//! [`PresentationAnimator`] as the world's [`WaddleAnimator`]. Call
//! [`shutdown_presentation`] during teardown.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Sender, unbounded};

use crate::events::animation::AnimationCmd;
use crate::resources::animator::WaddleAnimator;
use crate::systems::presentation::{PresentationAnimator, PresentationStats, presentation_thread};

#[derive(Resource)]
pub struct PresentationBridge {
    /// Sender for [`AnimationCmd`] messages (ECS -> presentation thread).
    pub tx_cmd: Sender<AnimationCmd>,
    pub handle: std::thread::JoinHandle<PresentationStats>,
}

/// Spawn the presentation thread and install the presentation animator.
pub fn setup_presentation(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AnimationCmd>();

    let handle = std::thread::spawn(move || presentation_thread(rx_cmd));

    world.insert_resource(WaddleAnimator::new(PresentationAnimator::new(tx_cmd.clone())));
    world.insert_resource(PresentationBridge { tx_cmd, handle });
}

/// Ask the presentation thread to stop, join it and return its counters.
///
/// Falls back to a headless animator so late state changes stay harmless.
pub fn shutdown_presentation(world: &mut World) -> Option<PresentationStats> {
    let bridge = world.remove_resource::<PresentationBridge>()?;
    world.insert_resource(WaddleAnimator::headless());
    let _ = bridge.tx_cmd.send(AnimationCmd::Shutdown);
    bridge.handle.join().ok()
}
