//! Crane controller system.
//!
//! Advances every [`Claw`] one frame and carries out the actions its state
//! machine asks for:
//!
//! - [`ClawAction::TryGrab`] runs a sphere overlap query at the claw's
//!   position against tagged collectibles. The nearest hit is attached with a
//!   [`HeldBy`] link; its body is frozen with gravity off.
//! - [`ClawAction::Release`] hands the item back: `HeldBy` removed, body
//!   unfrozen, gravity on, velocity zeroed.
//! - [`ClawAction::Animate`] triggers a [`ClawAnimationEvent`].
//!
//! # Related
//!
//! - [`crate::components::claw`] – the state machine itself
//! - [`crate::systems::heldby::follow_claw_system`] – moves held items each frame

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{info, warn};

use crate::components::claw::{Claw, ClawAction};
use crate::components::heldby::HeldBy;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{GRAVITY_FORCE, RigidBody};
use crate::components::spherecollider::{SphereCollider, sphere_overlaps};
use crate::components::tag::Tag;
use crate::events::animation::ClawAnimationEvent;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

/// Step each claw's state machine and apply the resulting actions.
pub fn crane_system(
    world_time: Res<WorldTime>,
    input: Res<InputState>,
    mut claws: Query<(Entity, &mut Claw, &mut MapPosition)>,
    mut loose: Query<
        (
            Entity,
            &MapPosition,
            &mut RigidBody,
            Option<&Tag>,
            Option<&SphereCollider>,
        ),
        (Without<Claw>, Without<HeldBy>),
    >,
    mut held: Query<&mut RigidBody, (With<HeldBy>, Without<Claw>)>,
    mut commands: Commands,
) {
    let dt = world_time.delta.max(0.0);

    for (claw_entity, mut claw, mut position) in claws.iter_mut() {
        let actions = claw.step(&mut position.pos, dt, &input);
        let claw_pos = position.pos;

        for action in actions {
            match action {
                ClawAction::Animate(trigger) => {
                    commands.trigger(ClawAnimationEvent {
                        claw: claw_entity,
                        trigger,
                    });
                }
                ClawAction::TryGrab => {
                    if claw.is_holding() {
                        continue;
                    }
                    let radius = claw.settings().grab_radius;
                    let wanted = claw.settings().collectible_tag.clone();

                    let nearest = loose
                        .iter()
                        .filter_map(|(entity, item_pos, _, tag, collider)| {
                            let tag = tag?;
                            if !tag.is(&wanted) {
                                return None;
                            }
                            let touching = match collider {
                                Some(c) => c.overlaps(item_pos.pos, claw_pos, radius),
                                None => sphere_overlaps(claw_pos, radius, item_pos.pos, 0.0),
                            };
                            touching
                                .then(|| (entity, item_pos.pos, claw_pos.distance(item_pos.pos)))
                        })
                        .min_by(|a, b| a.2.total_cmp(&b.2));

                    let Some((item, item_pos, _)) = nearest else {
                        info!("Claw {:?} closed on nothing", claw_entity);
                        continue;
                    };
                    if !claw.attach(item) {
                        continue;
                    }
                    if let Ok((_, _, mut rb, _, _)) = loose.get_mut(item) {
                        rb.velocity = Vec3::ZERO;
                        rb.set_force_enabled(GRAVITY_FORCE, false);
                        rb.freeze();
                    }
                    commands
                        .entity(item)
                        .insert(HeldBy::new(claw_entity, item_pos - claw_pos));
                    info!("Claw {:?} grabbed {:?}", claw_entity, item);
                }
                ClawAction::Release(item) => match held.get_mut(item) {
                    Ok(mut rb) => {
                        rb.velocity = Vec3::ZERO;
                        rb.set_force_enabled(GRAVITY_FORCE, true);
                        rb.unfreeze();
                        commands.entity(item).remove::<HeldBy>();
                        info!("Claw {:?} released {:?}", claw_entity, item);
                    }
                    Err(_) => {
                        warn!(
                            "Claw {:?} released {:?}, which no longer exists",
                            claw_entity, item
                        );
                    }
                },
                ClawAction::Transition { from, to } => {
                    info!("Claw {:?}: {} -> {}", claw_entity, from, to);
                }
            }
        }
    }
}
