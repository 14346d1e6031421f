use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Spherical collision shape centred on the entity's position.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct SphereCollider {
    pub radius: f32,
}

impl SphereCollider {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Whether this sphere at `position` touches a query sphere.
    pub fn overlaps(&self, position: Vec3, query_center: Vec3, query_radius: f32) -> bool {
        sphere_overlaps(position, self.radius, query_center, query_radius)
    }
}

/// Sphere vs sphere test. Touching counts as overlapping.
pub fn sphere_overlaps(center_a: Vec3, radius_a: f32, center_b: Vec3, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    center_a.distance_squared(center_b) <= reach * reach
}
