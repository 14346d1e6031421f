//! Trigger volume detection for collection zones.
//!
//! Each frame, every [`CollectionZone`] is tested against all loose bodies
//! (entities with a [`RigidBody`] that are not being carried). Bodies found
//! inside that were not inside last frame produce a [`TriggerEnterEvent`].

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::components::collectionzone::CollectionZone;
use crate::components::heldby::HeldBy;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::spherecollider::SphereCollider;
use crate::events::collision::TriggerEnterEvent;

pub fn collection_zone_system(
    mut zones: Query<(Entity, &MapPosition, &mut CollectionZone)>,
    bodies: Query<
        (Entity, &MapPosition, Option<&SphereCollider>),
        (With<RigidBody>, Without<HeldBy>, Without<CollectionZone>),
    >,
    mut commands: Commands,
) {
    for (zone_entity, zone_pos, mut zone) in zones.iter_mut() {
        let mut inside = FxHashSet::default();
        for (entity, body_pos, collider) in bodies.iter() {
            let radius = collider.map_or(0.0, |c| c.radius);
            if zone.contains_sphere(zone_pos.pos, body_pos.pos, radius) {
                inside.insert(entity);
            }
        }

        for &entity in inside.iter() {
            if !zone.occupants.contains(&entity) {
                commands.trigger(TriggerEnterEvent {
                    zone: zone_entity,
                    other: entity,
                });
            }
        }
        zone.occupants = inside;
    }
}
