//! Claw state machine.
//!
//! The [`Claw`] component owns the crane's cycle:
//!
//! ```text
//! Controllable -> Dropping -> ReturningUp -> MovingLeft -> DroppingOff -> ReturningHome -> Controllable
//! ```
//!
//! The timed parts of the cycle (the drop and the release) are sub-phases
//! carrying their own progress or elapsed-time counters, so the whole machine
//! advances one [`Claw::step`] per frame without a scheduler. `step` only
//! moves the claw's position; anything touching other entities (grabbing,
//! releasing, animation triggers) is returned as a [`ClawAction`] for
//! [`crane_system`](crate::systems::crane::crane_system) to carry out.
//!
//! `GameOver` is part of the state set but nothing transitions into it.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;
use smallvec::SmallVec;

use crate::components::clawanimator::AnimationTrigger;
use crate::resources::craneconfig::{ConfigError, CraneConfig};
use crate::resources::input::InputState;

/// Arrival tolerance for single-axis moves.
pub const AXIS_TOLERANCE: f32 = 0.05;
/// Arrival tolerance for full 3D moves.
pub const POINT_TOLERANCE: f32 = 0.1;

/// Progress through the drop sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropPhase {
    /// Lowering from the start height; `t` runs 0 to 1.
    Descending { t: f32 },
    /// Sitting at the bottom after closing.
    Holding { elapsed: f32 },
    /// Raising back to the start height; `t` runs 0 to 1.
    Ascending { t: f32 },
}

/// Progress through the release sequence over the drop-off point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleasePhase {
    /// Claw opening; the item is let go when this wait ends.
    Opening { elapsed: f32 },
    /// Pause after letting go.
    Settling { elapsed: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CraneState {
    #[default]
    Controllable,
    Dropping(DropPhase),
    ReturningUp,
    MovingLeft,
    DroppingOff(ReleasePhase),
    ReturningHome,
    GameOver,
}

impl CraneState {
    pub fn name(&self) -> &'static str {
        match self {
            CraneState::Controllable => "Controllable",
            CraneState::Dropping(_) => "Dropping",
            CraneState::ReturningUp => "ReturningUp",
            CraneState::MovingLeft => "MovingLeft",
            CraneState::DroppingOff(_) => "DroppingOff",
            CraneState::ReturningHome => "ReturningHome",
            CraneState::GameOver => "GameOver",
        }
    }

    /// Same top-level state, ignoring sub-phase progress.
    pub fn same_kind(&self, other: &CraneState) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Side effects requested by a [`Claw::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClawAction {
    /// Fire an animation trigger at the claw.
    Animate(AnimationTrigger),
    /// Look for a collectible under the claw and attach it.
    TryGrab,
    /// Hand the held entity back to the world.
    Release(Entity),
    /// Top-level state changed.
    Transition {
        from: &'static str,
        to: &'static str,
    },
}

pub type ClawActions = SmallVec<[ClawAction; 4]>;

/// Validated claw tuning, produced by [`CraneConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClawSettings {
    pub move_speed: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub drop_speed: f32,
    pub return_speed: f32,
    /// Height cleared before travelling to the drop-off.
    pub lift_height: f32,
    pub grab_radius: f32,
    /// Length of each wait in the drop and release sequences.
    pub pause_seconds: f32,
    pub collectible_tag: String,
    /// Only `y` is used: the height a drop starts and ends at.
    pub drop_start: Vec3,
    /// Only `y` is used: the bottom of a drop.
    pub drop_end: Vec3,
    /// Only `x` is used: where the claw releases its load.
    pub drop_off: Vec3,
    pub home: Vec3,
}

#[derive(Component, Debug, Clone)]
pub struct Claw {
    settings: ClawSettings,
    state: CraneState,
    held: Option<Entity>,
}

impl Claw {
    pub fn new(settings: ClawSettings) -> Self {
        Self {
            settings,
            state: CraneState::Controllable,
            held: None,
        }
    }

    /// Build a claw from configuration, failing on the first invalid setting.
    pub fn from_config(config: &CraneConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.validate()?))
    }

    pub fn settings(&self) -> &ClawSettings {
        &self.settings
    }

    pub fn state(&self) -> &CraneState {
        &self.state
    }

    pub fn held(&self) -> Option<Entity> {
        self.held
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// Take ownership of `item`. Refused if something is already held.
    pub fn attach(&mut self, item: Entity) -> bool {
        if self.held.is_some() {
            return false;
        }
        self.held = Some(item);
        true
    }

    /// Advance the state machine by `dt` seconds, moving `pos`.
    pub fn step(&mut self, pos: &mut Vec3, dt: f32, input: &InputState) -> ClawActions {
        let mut actions = ClawActions::new();
        let s = &self.settings;

        let next = match self.state {
            CraneState::Controllable => {
                pos.x = (pos.x + input.horizontal * s.move_speed * dt).clamp(s.min_x, s.max_x);
                if input.activate.just_pressed {
                    actions.push(ClawAction::Animate(AnimationTrigger::Open));
                    CraneState::Dropping(DropPhase::Descending { t: 0.0 })
                } else {
                    CraneState::Controllable
                }
            }
            CraneState::Dropping(DropPhase::Descending { t }) => {
                let t = t + dt * s.drop_speed;
                pos.y = lerp(s.drop_start.y, s.drop_end.y, t);
                if t >= 1.0 {
                    actions.push(ClawAction::Animate(AnimationTrigger::Close));
                    actions.push(ClawAction::TryGrab);
                    CraneState::Dropping(DropPhase::Holding { elapsed: 0.0 })
                } else {
                    CraneState::Dropping(DropPhase::Descending { t })
                }
            }
            CraneState::Dropping(DropPhase::Holding { elapsed }) => {
                let elapsed = elapsed + dt;
                if elapsed >= s.pause_seconds {
                    CraneState::Dropping(DropPhase::Ascending { t: 0.0 })
                } else {
                    CraneState::Dropping(DropPhase::Holding { elapsed })
                }
            }
            CraneState::Dropping(DropPhase::Ascending { t }) => {
                let t = t + dt * s.drop_speed;
                pos.y = lerp(s.drop_end.y, s.drop_start.y, t);
                if t >= 1.0 {
                    CraneState::ReturningUp
                } else {
                    CraneState::Dropping(DropPhase::Ascending { t })
                }
            }
            CraneState::ReturningUp => {
                let target = Vec3::new(pos.x, s.lift_height, pos.z);
                *pos = move_towards(*pos, target, s.return_speed * dt);
                if (pos.y - s.lift_height).abs() < AXIS_TOLERANCE {
                    CraneState::MovingLeft
                } else {
                    CraneState::ReturningUp
                }
            }
            CraneState::MovingLeft => {
                let target = Vec3::new(s.drop_off.x, pos.y, pos.z);
                *pos = move_towards(*pos, target, s.return_speed * dt);
                if (pos.x - s.drop_off.x).abs() < AXIS_TOLERANCE {
                    actions.push(ClawAction::Animate(AnimationTrigger::Open));
                    CraneState::DroppingOff(ReleasePhase::Opening { elapsed: 0.0 })
                } else {
                    CraneState::MovingLeft
                }
            }
            CraneState::DroppingOff(ReleasePhase::Opening { elapsed }) => {
                let elapsed = elapsed + dt;
                if elapsed >= s.pause_seconds {
                    if let Some(item) = self.held.take() {
                        actions.push(ClawAction::Release(item));
                    }
                    CraneState::DroppingOff(ReleasePhase::Settling { elapsed: 0.0 })
                } else {
                    CraneState::DroppingOff(ReleasePhase::Opening { elapsed })
                }
            }
            CraneState::DroppingOff(ReleasePhase::Settling { elapsed }) => {
                let elapsed = elapsed + dt;
                if elapsed >= s.pause_seconds {
                    CraneState::ReturningHome
                } else {
                    CraneState::DroppingOff(ReleasePhase::Settling { elapsed })
                }
            }
            CraneState::ReturningHome => {
                *pos = move_towards(*pos, s.home, s.return_speed * dt);
                if pos.distance(s.home) < POINT_TOLERANCE {
                    actions.push(ClawAction::Animate(AnimationTrigger::Idle));
                    CraneState::Controllable
                } else {
                    CraneState::ReturningHome
                }
            }
            CraneState::GameOver => CraneState::GameOver,
        };

        if !next.same_kind(&self.state) {
            actions.push(ClawAction::Transition {
                from: self.state.name(),
                to: next.name(),
            });
        }
        self.state = next;
        actions
    }
}

/// Interpolate with `t` clamped to [0, 1].
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Step from `current` towards `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + delta / distance * max_delta
    }
}
