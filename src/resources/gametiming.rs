//! Tick authority resource.
//!
//! A predicting host runs every logical tick more than once: first as the
//! authoritative/first-predicted pass, then again as speculative replays
//! while reconciling with the server. [`GameTiming`] records which of those
//! passes is executing right now.

use bevy_ecs::prelude::Resource;

use crate::waddle::host::TickAuthority;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTiming {
    /// Logical tick currently being simulated.
    pub cur_tick: u64,
    /// `true` on the first execution of `cur_tick`.
    pub first_time_predicted: bool,
    /// Number of replays of `cur_tick` executed so far.
    pub replays: u32,
}

impl Default for GameTiming {
    fn default() -> Self {
        GameTiming {
            cur_tick: 0,
            first_time_predicted: true,
            replays: 0,
        }
    }
}

impl GameTiming {
    /// Enter the first-predicted pass of `tick`.
    pub fn start_tick(&mut self, tick: u64) {
        self.cur_tick = tick;
        self.first_time_predicted = true;
        self.replays = 0;
    }

    /// Re-execute the current tick speculatively.
    pub fn start_replay(&mut self) {
        self.first_time_predicted = false;
        self.replays += 1;
    }
}

impl TickAuthority for GameTiming {
    fn is_first_time_predicted(&self) -> bool {
        self.first_time_predicted
    }
}
