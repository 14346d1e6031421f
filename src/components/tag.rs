use bevy_ecs::prelude::Component;

/// Tag carried by collectibles by default.
pub const POINTS_TAG: &str = "Points";

/// Category label used by overlap queries and trigger volumes.
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Tag(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}
