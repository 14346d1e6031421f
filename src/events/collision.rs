//! Trigger volume events.
//!
//! The collection zone system emits [`TriggerEnterEvent`] the first frame a
//! body is found inside a [`CollectionZone`](crate::components::collectionzone::CollectionZone).
//! It is not repeated while the body stays inside; leaving and re-entering
//! fires it again.
use bevy_ecs::prelude::*;

/// Event fired when a body moves into a trigger volume.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEnterEvent {
    /// The zone entity owning the volume.
    pub zone: Entity,
    /// The body that entered.
    pub other: Entity,
}
