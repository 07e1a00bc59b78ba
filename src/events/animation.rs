//! Commands exchanged with the presentation thread.

use crate::waddle::animation::WaddleClip;

/// Commands sent *to* the presentation thread.
#[derive(Debug, Clone)]
pub enum AnimationCmd {
    /// Start looping `clip` on the entity with the given id bits.
    Play { entity: u64, clip: WaddleClip },
    /// Stop the waddle and reset sprite rotation and offset.
    Stop { entity: u64 },
    Shutdown,
}
