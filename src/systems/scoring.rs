//! Score collection observers.
//!
//! - [`score_collection_observer`] awards points when a body carrying the
//!   zone's accepted tag enters it, then despawns the body.
//! - [`refresh_score_display`] rewrites the [`ScoreDisplay`] text after
//!   every award, if the host installed one.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::collectionzone::CollectionZone;
use crate::components::tag::Tag;
use crate::events::collision::TriggerEnterEvent;
use crate::events::score::ScoreChangedEvent;
use crate::resources::score::Score;
use crate::resources::scoredisplay::ScoreDisplay;

pub fn score_collection_observer(
    trigger: On<TriggerEnterEvent>,
    zones: Query<&CollectionZone>,
    tags: Query<&Tag>,
    mut score: ResMut<Score>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok(zone) = zones.get(event.zone) else {
        return;
    };
    let accepted = tags
        .get(event.other)
        .map(|tag| tag.is(&zone.accepts))
        .unwrap_or(false);
    if !accepted {
        debug!(
            "{:?} entered zone {:?} without the `{}` tag; ignored",
            event.other, event.zone, zone.accepts
        );
        return;
    }

    let points = zone.points_per_item;
    let total = score.add(points);
    commands.entity(event.other).try_despawn();
    info!(
        "Collected {:?} in zone {:?}: +{} (total {})",
        event.other, event.zone, points, total
    );

    commands.trigger(ScoreChangedEvent {
        zone: event.zone,
        delta: points,
        total,
    });
}

pub fn refresh_score_display(
    trigger: On<ScoreChangedEvent>,
    display: Option<ResMut<ScoreDisplay>>,
) {
    match display {
        Some(mut display) => display.set_total(trigger.event().total),
        None => debug!("No score display installed; skipping refresh"),
    }
}
