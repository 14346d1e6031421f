//! Forwarding of claw animation triggers.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::clawanimator::ClawAnimator;
use crate::events::animation::ClawAnimationEvent;

/// Hand the trigger to the claw's [`ClawAnimator`]. A claw without one
/// ignores the trigger.
pub fn apply_claw_animation(
    trigger: On<ClawAnimationEvent>,
    mut animators: Query<&mut ClawAnimator>,
) {
    let event = trigger.event();
    match animators.get_mut(event.claw) {
        Ok(mut animator) => animator.set_trigger(event.trigger),
        Err(_) => debug!(
            "Claw {:?} has no animator; dropped `{}`",
            event.claw,
            event.trigger.name()
        ),
    }
}
