//! Signal routing table.
//!
//! Each external signal maps to at most one controller call. Start signals
//! always go through the gate; stop signals force `false` so they win over a
//! gate that may not yet reflect an attribute changed in the same batch.

/// An external signal about a waddling entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaddleSignal {
    /// The waddle component was attached. `moving` is the held directional
    /// intent at attach time.
    Startup { moving: bool },
    /// Movement input changed.
    MoveInput { has_directional_movement: bool },
    /// The entity stood back up. `moving` is the held directional intent.
    Stood { moving: bool },
    Stunned,
    Downed,
    Buckled,
    MobStateChanged,
    GravityChanged { has_gravity: bool },
}

/// What the controller should be asked to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaddleRequest {
    pub waddling: bool,
    pub force: bool,
}

impl WaddleRequest {
    /// Gate-checked start.
    pub const START: WaddleRequest = WaddleRequest {
        waddling: true,
        force: false,
    };
    /// Forced stop.
    pub const STOP: WaddleRequest = WaddleRequest {
        waddling: false,
        force: true,
    };

    /// Follow the given intent, gate-checked.
    pub fn follow(waddling: bool) -> Self {
        Self {
            waddling,
            force: false,
        }
    }
}

/// Map a signal onto a controller request. `None` means no call at all.
pub fn route(signal: WaddleSignal) -> Option<WaddleRequest> {
    match signal {
        WaddleSignal::Startup { moving } => moving.then_some(WaddleRequest::START),
        WaddleSignal::MoveInput {
            has_directional_movement,
        } => Some(WaddleRequest::follow(has_directional_movement)),
        // only resume waddling if they are trying to move
        WaddleSignal::Stood { moving } => moving.then_some(WaddleRequest::START),
        WaddleSignal::Stunned
        | WaddleSignal::Downed
        | WaddleSignal::Buckled
        | WaddleSignal::MobStateChanged => Some(WaddleRequest::STOP),
        // Gravity coming back is not a reason to resume.
        WaddleSignal::GravityChanged { has_gravity } => {
            (!has_gravity).then_some(WaddleRequest::STOP)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_only_when_moving() {
        assert_eq!(
            route(WaddleSignal::Startup { moving: true }),
            Some(WaddleRequest::START)
        );
        assert_eq!(route(WaddleSignal::Startup { moving: false }), None);
    }

    #[test]
    fn move_input_follows_intent_through_gate() {
        assert_eq!(
            route(WaddleSignal::MoveInput {
                has_directional_movement: true
            }),
            Some(WaddleRequest {
                waddling: true,
                force: false
            })
        );
        assert_eq!(
            route(WaddleSignal::MoveInput {
                has_directional_movement: false
            }),
            Some(WaddleRequest {
                waddling: false,
                force: false
            })
        );
    }

    #[test]
    fn stood_only_resumes_when_moving() {
        assert_eq!(
            route(WaddleSignal::Stood { moving: true }),
            Some(WaddleRequest::START)
        );
        assert_eq!(route(WaddleSignal::Stood { moving: false }), None);
    }

    #[test]
    fn stop_signals_force_false() {
        for signal in [
            WaddleSignal::Stunned,
            WaddleSignal::Downed,
            WaddleSignal::Buckled,
            WaddleSignal::MobStateChanged,
            WaddleSignal::GravityChanged { has_gravity: false },
        ] {
            assert_eq!(route(signal), Some(WaddleRequest::STOP), "{signal:?}");
        }
    }

    #[test]
    fn gravity_restored_is_not_a_trigger() {
        assert_eq!(route(WaddleSignal::GravityChanged { has_gravity: true }), None);
    }
}
