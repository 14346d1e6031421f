//! World setup and the per-frame driver.
//!
//! [`setup_world`] validates the configuration, inserts every resource,
//! registers the observers and spawns the claw and its collection zone.
//! [`build_schedule`] returns the frame pipeline:
//!
//! 1. [`crane_system`] – state machine, grab and release
//! 2. [`follow_claw_system`] – carried items follow the claw
//! 3. [`physics_system`] – released items fall
//! 4. [`collection_zone_system`] – entries into the chute are scored
//!
//! [`CraneGame`] bundles both for hosts that just want to feed input and
//! read the score back.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::info;

use crate::components::claw::{Claw, ClawSettings, CraneState};
use crate::components::clawanimator::ClawAnimator;
use crate::components::collectionzone::CollectionZone;
use crate::components::heldby::HeldBy;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::spherecollider::SphereCollider;
use crate::components::tag::Tag;
use crate::resources::craneconfig::{ConfigError, CraneConfig};
use crate::resources::input::InputState;
use crate::resources::physics::PhysicsSettings;
use crate::resources::score::Score;
use crate::resources::scoredisplay::ScoreDisplay;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::apply_claw_animation;
use crate::systems::collectionzone::collection_zone_system;
use crate::systems::crane::crane_system;
use crate::systems::heldby::follow_claw_system;
use crate::systems::physics::physics_system;
use crate::systems::scoring::{refresh_score_display, score_collection_observer};
use crate::systems::time::update_world_time;

/// Radius given to collectibles spawned through [`spawn_collectible`].
pub const COLLECTIBLE_RADIUS: f32 = 0.5;

/// Entities created by [`setup_world`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneEntities {
    pub claw: Entity,
    pub zone: Entity,
}

/// Insert resources and observers, then spawn the claw and collection zone.
///
/// Fails before touching the world if the configuration is invalid.
pub fn setup_world(world: &mut World, config: &CraneConfig) -> Result<SceneEntities, ConfigError> {
    let settings = config.validate()?;

    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(Score::new());
    world.insert_resource(ScoreDisplay::default());
    world.insert_resource(PhysicsSettings {
        gravity: Vec3::new(0.0, config.gravity, 0.0),
        floor_y: config.floor_y,
    });
    world.insert_resource(config.clone());

    world.spawn(Observer::new(apply_claw_animation));
    world.spawn(Observer::new(score_collection_observer));
    world.spawn(Observer::new(refresh_score_display));
    // Observers must exist before the first system triggers anything.
    world.flush();

    let zone_center = config.zone_center_for(&settings);
    let zone = spawn_collection_zone(
        world,
        zone_center,
        config.zone_half_extents,
        &settings.collectible_tag,
        config.score_per_item,
    );
    let claw = spawn_claw(world, settings);

    info!(
        "Scene ready: claw {:?}, collection zone {:?} at {}",
        claw, zone, zone_center
    );
    Ok(SceneEntities { claw, zone })
}

/// The per-frame system pipeline.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            crane_system,
            follow_claw_system,
            physics_system,
            collection_zone_system,
        )
            .chain(),
    );
    update
}

/// Spawn a claw at its home waypoint, with an animator attached.
pub fn spawn_claw(world: &mut World, settings: ClawSettings) -> Entity {
    let home = settings.home;
    world
        .spawn((
            Claw::new(settings),
            MapPosition::from_vec(home),
            ClawAnimator::new(),
        ))
        .id()
}

/// Spawn a tagged collectible resting under the world's gravity.
pub fn spawn_collectible(world: &mut World, pos: Vec3, tag: &str) -> Entity {
    let gravity = world
        .get_resource::<PhysicsSettings>()
        .copied()
        .unwrap_or_default()
        .gravity;
    world
        .spawn((
            MapPosition::from_vec(pos),
            RigidBody::with_gravity(gravity),
            SphereCollider::new(COLLECTIBLE_RADIUS),
            Tag::new(tag),
        ))
        .id()
}

pub fn spawn_collection_zone(
    world: &mut World,
    center: Vec3,
    half_extents: Vec3,
    accepts: &str,
    points_per_item: u32,
) -> Entity {
    world
        .spawn((
            MapPosition::from_vec(center),
            CollectionZone::new(half_extents, accepts, points_per_item),
        ))
        .id()
}

/// A ready-to-run crane session.
pub struct CraneGame {
    world: World,
    schedule: Schedule,
    scene: SceneEntities,
    config: CraneConfig,
}

impl CraneGame {
    pub fn new(config: &CraneConfig) -> Result<Self, ConfigError> {
        let mut world = World::new();
        let scene = setup_world(&mut world, config)?;
        Ok(Self {
            world,
            schedule: build_schedule(),
            scene,
            config: config.clone(),
        })
    }

    /// Throw the session away and start over with the same configuration.
    /// Score goes back to zero and all collectibles are gone.
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        *self = Self::new(&self.config)?;
        Ok(())
    }

    /// Run one frame with this frame's raw input.
    pub fn tick(&mut self, dt: f32, horizontal: f32, activate_down: bool) {
        self.world
            .resource_mut::<InputState>()
            .update(horizontal, activate_down);
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
    }

    pub fn spawn_collectible(&mut self, pos: Vec3) -> Entity {
        let tag = self.config.collectible_tag.clone();
        spawn_collectible(&mut self.world, pos, &tag)
    }

    /// Tagged collectibles not currently carried, with their positions.
    pub fn collectibles(&mut self) -> Vec<(Entity, Vec3)> {
        let tag = self.config.collectible_tag.as_str();
        let mut query = self
            .world
            .query_filtered::<(Entity, &MapPosition, &Tag), (With<RigidBody>, Without<HeldBy>)>();
        query
            .iter(&self.world)
            .filter(|(_, _, t)| t.is(tag))
            .map(|(e, p, _)| (e, p.pos))
            .collect()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<Score>().total()
    }

    pub fn score_text(&self) -> &str {
        self.world.resource::<ScoreDisplay>().text()
    }

    pub fn claw(&self) -> Entity {
        self.scene.claw
    }

    pub fn zone(&self) -> Entity {
        self.scene.zone
    }

    fn claw_component(&self) -> &Claw {
        self.world
            .get::<Claw>(self.scene.claw)
            .expect("claw is spawned at setup and never despawned")
    }

    pub fn claw_state(&self) -> CraneState {
        *self.claw_component().state()
    }

    pub fn claw_settings(&self) -> &ClawSettings {
        self.claw_component().settings()
    }

    pub fn held_item(&self) -> Option<Entity> {
        self.claw_component().held()
    }

    pub fn claw_position(&self) -> Vec3 {
        self.world
            .get::<MapPosition>(self.scene.claw)
            .map(|p| p.pos)
            .unwrap_or(Vec3::ZERO)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
