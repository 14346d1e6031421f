//! Session score resource.
//!
//! Owned by the collector side of the game: only
//! [`score_collection_observer`](crate::systems::scoring::score_collection_observer)
//! adds to it. Query it with [`Score::total`].
use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    total: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Add `points` and return the new total. Saturates instead of wrapping.
    pub fn add(&mut self, points: u32) -> u32 {
        self.total = self.total.saturating_add(points);
        self.total
    }
}
