//! Trigger volume that awards points for collectibles dropped into it.
//!
//! A [`CollectionZone`] is an axis-aligned box centred on the zone entity's
//! [`MapPosition`](super::mapposition::MapPosition). It has no collision
//! response; the
//! [`collection_zone_system`](crate::systems::collectionzone::collection_zone_system)
//! only reports bodies that move into it.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;
use rustc_hash::FxHashSet;

#[derive(Component, Debug, Clone)]
pub struct CollectionZone {
    /// Half size of the box along each axis.
    pub half_extents: Vec3,
    /// Tag an entering entity must carry to be collected.
    pub accepts: String,
    /// Points awarded per collected entity.
    pub points_per_item: u32,
    /// Entities inside the volume as of the last detection pass.
    pub occupants: FxHashSet<Entity>,
}

impl CollectionZone {
    pub fn new(half_extents: Vec3, accepts: impl Into<String>, points_per_item: u32) -> Self {
        Self {
            half_extents,
            accepts: accepts.into(),
            points_per_item,
            occupants: FxHashSet::default(),
        }
    }

    /// Returns (min, max) corners for the zone placed at `center`.
    pub fn aabb(&self, center: Vec3) -> (Vec3, Vec3) {
        let half = self.half_extents.abs();
        (center - half, center + half)
    }

    /// Sphere vs box test; a radius of zero makes it a point test.
    pub fn contains_sphere(&self, center: Vec3, point: Vec3, radius: f32) -> bool {
        let (min, max) = self.aabb(center);
        let closest = point.clamp(min, max);
        closest.distance_squared(point) <= radius * radius
    }
}
