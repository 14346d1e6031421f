use bevy_ecs::prelude::Resource;
use glam::Vec3;

/// World-wide physics constants for collectibles.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSettings {
    /// Acceleration given to new collectibles as their gravity force.
    pub gravity: Vec3,
    /// Height of the cabinet floor; bodies rest on it.
    pub floor_y: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        PhysicsSettings {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            floor_y: 0.0,
        }
    }
}
