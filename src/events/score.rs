use bevy_ecs::prelude::*;

/// Event fired after points were awarded.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChangedEvent {
    /// Zone that awarded the points.
    pub zone: Entity,
    /// Points added by this collection.
    pub delta: u32,
    /// Score after the collection.
    pub total: u32,
}
