//! Animation trigger sink for the claw.
//!
//! The crane never plays animations itself. It fires named triggers which an
//! external animation player reads from [`ClawAnimator`]. A claw spawned
//! without this component simply drops the triggers.

use bevy_ecs::prelude::Component;

/// Named animation triggers understood by the claw rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTrigger {
    Open,
    Close,
    Idle,
}

impl AnimationTrigger {
    pub fn name(&self) -> &'static str {
        match self {
            AnimationTrigger::Open => "Open",
            AnimationTrigger::Close => "Close",
            AnimationTrigger::Idle => "Idle",
        }
    }
}

/// Triggers fired at the claw since the animation player last drained them.
#[derive(Component, Debug, Clone, Default)]
pub struct ClawAnimator {
    pending: Vec<AnimationTrigger>,
    last: Option<AnimationTrigger>,
}

impl ClawAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_trigger(&mut self, trigger: AnimationTrigger) {
        self.pending.push(trigger);
        self.last = Some(trigger);
    }

    /// Most recent trigger, kept after draining.
    pub fn last(&self) -> Option<AnimationTrigger> {
        self.last
    }

    pub fn pending(&self) -> &[AnimationTrigger] {
        &self.pending
    }

    /// Hand all pending triggers to the animation player.
    pub fn take_pending(&mut self) -> Vec<AnimationTrigger> {
        std::mem::take(&mut self.pending)
    }
}
