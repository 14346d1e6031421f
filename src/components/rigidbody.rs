//! Kinematic body component with named acceleration forces.
//!
//! The [`RigidBody`] component stores velocity and named acceleration forces
//! for an entity. Each force can be individually enabled/disabled, which is
//! how the claw switches gravity off while it carries a collectible and back
//! on when it lets go.
//!
//! The `frozen` flag disables all movement calculations, used while the
//! entity's position is driven by [`HeldBy`](super::heldby::HeldBy).

use bevy_ecs::prelude::Component;
use glam::Vec3;
use rustc_hash::FxHashMap;

/// Name of the force registered for gravity on collectibles.
pub const GRAVITY_FORCE: &str = "gravity";

/// One entry in a body's force table.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// Acceleration in m/s².
    pub value: Vec3,
    /// Disabled forces stay registered but contribute nothing.
    pub enabled: bool,
}

impl AccelerationForce {
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// Kinematic body storing velocity and named acceleration forces.
///
/// Consumed by [`physics_system`](crate::systems::physics::physics_system)
/// to integrate [`MapPosition`](super::mapposition::MapPosition).
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::new();
/// rb.add_force(GRAVITY_FORCE, Vec3::new(0.0, -9.81, 0.0));
///
/// // Picked up: stop falling and ignore physics
/// rb.set_force_enabled(GRAVITY_FORCE, false);
/// rb.freeze();
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Linear velocity in m/s.
    pub velocity: Vec3,
    /// Force table keyed by name, e.g. [`GRAVITY_FORCE`].
    pub forces: FxHashMap<String, AccelerationForce>,
    /// When true, the physics system skips this entity entirely.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// At rest, with an empty force table.
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            forces: FxHashMap::default(),
            frozen: false,
        }
    }

    /// Create a RigidBody affected by the given gravity vector.
    pub fn with_gravity(gravity: Vec3) -> Self {
        let mut rb = Self::new();
        rb.add_force(GRAVITY_FORCE, gravity);
        rb
    }

    /// Register `name`, replacing any previous force of that name. Starts enabled.
    pub fn add_force(&mut self, name: &str, value: Vec3) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Enable or disable a force by name. Unknown names are ignored.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
        }
    }

    /// Whether the named force exists and is enabled.
    pub fn is_force_enabled(&self, name: &str) -> bool {
        self.forces.get(name).is_some_and(|f| f.enabled)
    }

    /// Sum of all enabled forces.
    pub fn total_acceleration(&self) -> Vec3 {
        self.forces
            .values()
            .filter(|f| f.enabled)
            .fold(Vec3::ZERO, |acc, f| acc + f.value)
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
