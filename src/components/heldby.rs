//! Component marking an entity as carried by a claw.
//!
//! While an entity has [`HeldBy`], the
//! [`follow_claw_system`](crate::systems::heldby::follow_claw_system) keeps
//! its position at the claw's position plus the stored offset, and the
//! physics system leaves it alone. Removing the component hands the entity
//! back to the world.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;

/// Ownership link from a carried entity to the claw holding it.
#[derive(Debug, Clone, Copy, Component)]
pub struct HeldBy {
    /// The claw entity doing the carrying.
    pub claw: Entity,
    /// Offset from the claw's position, captured at pickup.
    pub offset: Vec3,
}

impl HeldBy {
    pub fn new(claw: Entity, offset: Vec3) -> Self {
        Self { claw, offset }
    }
}
