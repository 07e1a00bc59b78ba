//! Presentation side of the waddle animation.
//!
//! [`PresentationAnimator`] is the [`AnimationHook`] used by hosts that draw
//! sprites. It turns each state change into an [`AnimationCmd`] and sends it
//! to [`presentation_thread`], which owns the playing clips. The simulation
//! thread never waits on playback.
//!
//! See also: [`crate::resources::presentation`].

use std::time::Instant;

use bevy_ecs::prelude::Entity;
use crossbeam_channel::{Receiver, Sender};
use log::debug;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::events::animation::AnimationCmd;
use crate::waddle::animation::{AnimationCue, AnimationHook, WaddleClip};

/// Animation hook that plays waddle clips on the presentation thread.
pub struct PresentationAnimator {
    tx_cmd: Sender<AnimationCmd>,
    /// Which side the previous step tilted to, per entity.
    last_step: FxHashMap<Entity, bool>,
}

impl PresentationAnimator {
    pub fn new(tx_cmd: Sender<AnimationCmd>) -> Self {
        Self {
            tx_cmd,
            last_step: FxHashMap::default(),
        }
    }
}

impl AnimationHook for PresentationAnimator {
    fn update_animation(&mut self, entity: Entity, waddling: bool, cue: &AnimationCue) {
        let cmd = if waddling {
            let left_step = self.last_step.entry(entity).or_insert(false);
            *left_step = !*left_step;
            AnimationCmd::Play {
                entity: entity.to_bits(),
                clip: WaddleClip::for_step(cue, *left_step),
            }
        } else {
            AnimationCmd::Stop {
                entity: entity.to_bits(),
            }
        };
        // Ignore send errors once the thread has shut down.
        let _ = self.tx_cmd.send(cmd);
    }

    fn forget(&mut self, entity: Entity) {
        if self.last_step.remove(&entity).is_some() {
            let _ = self.tx_cmd.send(AnimationCmd::Stop {
                entity: entity.to_bits(),
            });
        }
    }
}

/// Playback counters reported when the presentation thread exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PresentationStats {
    pub clips_started: u64,
    pub clips_stopped: u64,
    /// Entities still waddling at shutdown.
    pub active_at_shutdown: usize,
    pub peak_active: usize,
}

struct ActiveClip {
    clip: WaddleClip,
    started: Instant,
}

/// Entry point of the presentation thread.
///
/// Blocks on the command channel, starting and stopping looping clips,
/// until it receives [`AnimationCmd::Shutdown`] or every sender is gone.
pub fn presentation_thread(rx_cmd: Receiver<AnimationCmd>) -> PresentationStats {
    debug!(
        "[presentation] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut active: FxHashMap<u64, ActiveClip> = FxHashMap::default();
    let mut stats = PresentationStats::default();

    for cmd in rx_cmd.iter() {
        match cmd {
            AnimationCmd::Play { entity, clip } => {
                active.insert(
                    entity,
                    ActiveClip {
                        clip,
                        started: Instant::now(),
                    },
                );
                stats.clips_started += 1;
                stats.peak_active = stats.peak_active.max(active.len());
            }
            AnimationCmd::Stop { entity } => {
                if let Some(playing) = active.remove(&entity) {
                    let elapsed = playing.started.elapsed().as_secs_f32();
                    // Sprite rotation and offset go back to rest here.
                    debug!(
                        "[presentation] entity {} stopped after {:.2}s ({} step clip)",
                        entity, elapsed, playing.clip.length
                    );
                    stats.clips_stopped += 1;
                }
            }
            AnimationCmd::Shutdown => break,
        }
    }

    stats.active_at_shutdown = active.len();
    debug!("[presentation] thread exiting: {:?}", stats);
    stats
}
