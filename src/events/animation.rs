//! Claw animation trigger events.
//!
//! [`crane_system`](crate::systems::crane::crane_system) fires a
//! [`ClawAnimationEvent`] whenever the claw should open, close or go idle.
//! The event is fire-and-forget; see
//! [`apply_claw_animation`](crate::systems::animation::apply_claw_animation)
//! for how it reaches the claw's animator.

use bevy_ecs::prelude::*;

use crate::components::clawanimator::AnimationTrigger;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClawAnimationEvent {
    /// The claw the trigger is aimed at.
    pub claw: Entity,
    pub trigger: AnimationTrigger,
}
