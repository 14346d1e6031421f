//! Frame clock update.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance [`WorldTime`] by one host frame of `dt` seconds.
///
/// Negative deltas count as zero so a misbehaving host can never run the
/// crane backwards. The frame counter advances even while paused.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut clock = world.resource_mut::<WorldTime>();
    let step = dt.max(0.0) * clock.time_scale;
    clock.delta = step;
    clock.elapsed += step;
    clock.frame_count += 1;
}
