//! Per-frame input resource.
//!
//! The host polls its input devices and feeds the result into
//! [`InputState::update`] once per frame. The crane only cares about a
//! continuous horizontal axis and a single "activate" button.
use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state with edge detection.
pub struct BoolState {
    /// Whether the button is currently held.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Feed the current raw state and derive the edges from the previous one.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame input relevant to the crane.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    /// Horizontal axis in [-1, 1]; negative is left.
    pub horizontal: f32,
    /// Drop button.
    pub activate: BoolState,
}

impl InputState {
    pub fn update(&mut self, horizontal: f32, activate_down: bool) {
        self.horizontal = if horizontal.is_finite() {
            horizontal.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        self.activate.update(activate_down);
    }
}
