//! ECS components for crane entities.
//!
//! Submodules overview:
//! - [`claw`] – the claw's state machine, settings and requested actions
//! - [`clawanimator`] – animation trigger sink read by the host's animator
//! - [`collectionzone`] – trigger volume that awards points
//! - [`heldby`] – link from a carried item to the claw holding it
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`rigidbody`] – kinematic body with toggleable named forces
//! - [`spherecollider`] – spherical shape for overlap queries
//! - [`tag`] – category label such as `"Points"`

pub mod claw;
pub mod clawanimator;
pub mod collectionzone;
pub mod heldby;
pub mod mapposition;
pub mod rigidbody;
pub mod spherecollider;
pub mod tag;
