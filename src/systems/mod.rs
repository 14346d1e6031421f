//! Game systems and observers.
//!
//! Submodules overview
//! - [`animation`] – forward claw animation triggers to the animator
//! - [`collectionzone`] – detect bodies entering collection zones
//! - [`crane`] – advance the claw state machine and apply grabs/releases
//! - [`heldby`] – keep carried items attached to their claw
//! - [`physics`] – integrate gravity and rest bodies on the floor
//! - [`scoring`] – award points and refresh the score display
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod collectionzone;
pub mod crane;
pub mod heldby;
pub mod physics;
pub mod scoring;
pub mod time;
