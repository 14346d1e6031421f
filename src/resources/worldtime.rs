//! Simulation clock.
//!
//! Every crane timer reads `delta` from here: the drop and lift lerps, the
//! pauses at the bottom and over the chute, and gravity on released prizes.
//! The host advances it once per frame through
//! [`update_world_time`](crate::systems::time::update_world_time).

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WorldTime {
    /// Scaled seconds since the session started.
    pub elapsed: f32,
    /// Scaled seconds covered by the current frame.
    pub delta: f32,
    /// Multiplier applied to host deltas. `0.0` pauses the crane.
    pub time_scale: f32,
    /// Frames simulated so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn paused(&self) -> bool {
        self.time_scale == 0.0
    }
}
