//! Event types exchanged between systems and observers.
//!
//! Events keep the crane and the collector decoupled: the crane announces
//! animation triggers, the zone announces entries, and scoring announces
//! score changes. Observers in [`crate::systems`] react to them.
//!
//! Submodules:
//! - [`animation`] – named triggers aimed at the claw's animator
//! - [`collision`] – trigger volume enter notifications
//! - [`score`] – score change notifications for the display
pub mod animation;
pub mod collision;
pub mod score;
