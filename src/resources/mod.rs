//! ECS resources made available to systems.
//!
//! Overview
//! - `craneconfig` – INI-backed tuning and its validation errors
//! - `input` – per-frame horizontal axis and activate button
//! - `physics` – gravity and floor height for collectibles
//! - `score` – the session's score counter
//! - `scoredisplay` – the formatted text for the host's score label
//! - `worldtime` – simulation time and delta
pub mod craneconfig;
pub mod input;
pub mod physics;
pub mod score;
pub mod scoredisplay;
pub mod worldtime;
