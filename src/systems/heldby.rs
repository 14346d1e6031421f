//! System keeping carried entities attached to their claw.
//!
//! Updates the position of entities with the [`HeldBy`] component to the
//! claw's position plus the offset captured at pickup. Held entities whose
//! claw is gone stay where they are.

use bevy_ecs::prelude::*;

use crate::components::claw::Claw;
use crate::components::heldby::HeldBy;
use crate::components::mapposition::MapPosition;

pub fn follow_claw_system(
    mut followers: Query<(&HeldBy, &mut MapPosition), Without<Claw>>,
    claws: Query<&MapPosition, With<Claw>>,
) {
    for (held_by, mut follower_pos) in followers.iter_mut() {
        if let Ok(claw_pos) = claws.get(held_by.claw) {
            follower_pos.pos = claw_pos.pos + held_by.offset;
        }
    }
}
