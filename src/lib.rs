//! Claw crane minigame library.
//!
//! A claw you steer left and right, drop into a pit of prizes and send back
//! to a chute, plus the collector that scores whatever lands in the chute.
//! Built on **bevy_ecs**; rendering, animation playback and input polling
//! are left to the host, which talks to the game through
//! [`resources::input::InputState`],
//! [`components::clawanimator::ClawAnimator`] and
//! [`resources::scoredisplay::ScoreDisplay`].
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (claw, collectibles, zones, bodies)
//! - [`events`] – animation, trigger-enter and score events
//! - [`game`] – world setup, frame schedule and the [`game::CraneGame`] driver
//! - [`resources`] – configuration, input, score, time
//! - [`systems`] – crane, physics, trigger detection and scoring

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
