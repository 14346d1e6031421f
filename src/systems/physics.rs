//! Minimal rigid body integration.
//!
//! Collectibles only need to fall and come to rest: enabled forces are
//! integrated into velocity, velocity into position, and bodies are clamped
//! to the floor from [`PhysicsSettings`]. Frozen and held bodies are skipped.

use bevy_ecs::prelude::*;

use crate::components::heldby::HeldBy;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::spherecollider::SphereCollider;
use crate::resources::physics::PhysicsSettings;
use crate::resources::worldtime::WorldTime;

pub fn physics_system(
    world_time: Res<WorldTime>,
    physics: Res<PhysicsSettings>,
    mut query: Query<(&mut MapPosition, &mut RigidBody, Option<&SphereCollider>), Without<HeldBy>>,
) {
    let dt = world_time.delta.max(0.0);
    for (mut position, mut rb, collider) in query.iter_mut() {
        if rb.frozen {
            continue;
        }
        let acceleration = rb.total_acceleration();
        rb.velocity += acceleration * dt;
        position.pos += rb.velocity * dt;

        let rest_y = physics.floor_y + collider.map_or(0.0, |c| c.radius);
        if position.pos.y < rest_y {
            position.pos.y = rest_y;
            if rb.velocity.y < 0.0 {
                rb.velocity.y = 0.0;
            }
        }
    }
}
