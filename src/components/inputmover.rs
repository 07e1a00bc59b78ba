//! Movement intent component.
//!
//! [`InputMover`] mirrors the movement buttons the controlling player is
//! currently holding. The host's input subsystem owns it; the waddle router
//! only reads it to decide whether an entity is *trying* to move.

use bevy_ecs::prelude::Component;
use bitflags::bitflags;

bitflags! {
    /// Set of held movement buttons.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MoveButtons: u8 {
        const UP = 1;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        /// Walk modifier. Holding it disables sprinting.
        const WALK = 1 << 4;
        const ANY_DIRECTION = Self::UP.bits() | Self::DOWN.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// Movement buttons currently held for an entity.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputMover {
    pub held_move_buttons: MoveButtons,
}

impl InputMover {
    pub fn new(held_move_buttons: MoveButtons) -> Self {
        Self { held_move_buttons }
    }

    /// Whether any of the four directional buttons is held.
    pub fn has_directional_movement(&self) -> bool {
        self.held_move_buttons.intersects(MoveButtons::ANY_DIRECTION)
    }

    /// Sprinting is the default gait; holding walk turns it off.
    pub fn is_sprinting(&self) -> bool {
        !self.held_move_buttons.contains(MoveButtons::WALK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_buttons_is_not_directional() {
        let mover = InputMover::default();
        assert!(!mover.has_directional_movement());
        assert!(mover.is_sprinting());
    }

    #[test]
    fn walk_alone_is_not_directional() {
        let mover = InputMover::new(MoveButtons::WALK);
        assert!(!mover.has_directional_movement());
        assert!(!mover.is_sprinting());
    }

    #[test]
    fn any_direction_counts() {
        for dir in [
            MoveButtons::UP,
            MoveButtons::DOWN,
            MoveButtons::LEFT,
            MoveButtons::RIGHT,
        ] {
            assert!(InputMover::new(dir).has_directional_movement());
            assert!(InputMover::new(dir | MoveButtons::WALK).has_directional_movement());
        }
    }

    #[test]
    fn releasing_walk_keeps_direction() {
        let held = MoveButtons::from_bits_truncate(0xFF);
        assert_eq!(held, MoveButtons::all());
        assert_eq!(held.difference(MoveButtons::WALK), MoveButtons::ANY_DIRECTION);
        assert!(InputMover::new(held.difference(MoveButtons::WALK)).is_sprinting());
    }
}
