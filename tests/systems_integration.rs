//! Per-system tick tests: physics, held-item following, zone detection and scoring.

use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;
use glam::Vec3;

use clawcrane::components::claw::Claw;
use clawcrane::components::collectionzone::CollectionZone;
use clawcrane::components::heldby::HeldBy;
use clawcrane::components::mapposition::MapPosition;
use clawcrane::components::rigidbody::RigidBody;
use clawcrane::components::spherecollider::SphereCollider;
use clawcrane::components::tag::{POINTS_TAG, Tag};
use clawcrane::events::collision::TriggerEnterEvent;
use clawcrane::events::score::ScoreChangedEvent;
use clawcrane::game::{spawn_claw, spawn_collectible, spawn_collection_zone};
use clawcrane::resources::craneconfig::CraneConfig;
use clawcrane::resources::physics::PhysicsSettings;
use clawcrane::resources::score::Score;
use clawcrane::resources::scoredisplay::ScoreDisplay;
use clawcrane::resources::worldtime::WorldTime;
use clawcrane::systems::collectionzone::collection_zone_system;
use clawcrane::systems::heldby::follow_claw_system;
use clawcrane::systems::physics::physics_system;
use clawcrane::systems::scoring::{refresh_score_display, score_collection_observer};

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Resource, Default)]
struct EnterCount(u32);

#[derive(Resource, Default)]
struct ScoreEvents(Vec<(u32, u32)>);

fn count_enters(_trigger: On<TriggerEnterEvent>, mut count: ResMut<EnterCount>) {
    count.0 += 1;
}

fn record_score(trigger: On<ScoreChangedEvent>, mut events: ResMut<ScoreEvents>) {
    let event = trigger.event();
    events.0.push((event.delta, event.total));
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.insert_resource(PhysicsSettings::default());
    world.insert_resource(Score::new());
    world.insert_resource(ScoreDisplay::default());
    world.init_resource::<EnterCount>();
    world.init_resource::<ScoreEvents>();
    world
}

fn with_scoring(world: &mut World) {
    world.spawn(Observer::new(score_collection_observer));
    world.spawn(Observer::new(refresh_score_display));
    world.spawn(Observer::new(record_score));
    world.flush();
}

fn tick_physics(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(physics_system);
    schedule.run(world);
}

fn tick_follow(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(follow_claw_system);
    schedule.run(world);
}

fn tick_zone(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(collection_zone_system);
    schedule.run(world);
}

// ==================== physics_system ====================

#[test]
fn physics_applies_gravity_and_rests_on_floor() {
    let mut world = make_world(0.1);
    let e = spawn_collectible(&mut world, Vec3::new(0.0, 5.0, 0.0), POINTS_TAG);

    tick_physics(&mut world);
    let rb = world.get::<RigidBody>(e).unwrap();
    assert!(approx_eq(rb.velocity.y, -0.981));
    let y = world.get::<MapPosition>(e).unwrap().pos.y;
    assert!(approx_eq(y, 5.0 - 0.0981));

    for _ in 0..100 {
        tick_physics(&mut world);
    }
    let y = world.get::<MapPosition>(e).unwrap().pos.y;
    let radius = world.get::<SphereCollider>(e).unwrap().radius;
    assert!(approx_eq(y, radius));
    assert!(approx_eq(world.get::<RigidBody>(e).unwrap().velocity.y, 0.0));
}

#[test]
fn physics_skips_frozen_bodies() {
    let mut world = make_world(0.1);
    let e = spawn_collectible(&mut world, Vec3::new(0.0, 5.0, 0.0), POINTS_TAG);
    world.get_mut::<RigidBody>(e).unwrap().freeze();

    tick_physics(&mut world);
    assert!(approx_eq(world.get::<MapPosition>(e).unwrap().pos.y, 5.0));
}

#[test]
fn physics_skips_held_bodies() {
    let mut world = make_world(0.1);
    let claw = world.spawn(MapPosition::new(0.0, 5.0, 0.0)).id();
    let e = spawn_collectible(&mut world, Vec3::new(0.0, 4.5, 0.0), POINTS_TAG);
    world
        .entity_mut(e)
        .insert(HeldBy::new(claw, Vec3::new(0.0, -0.5, 0.0)));

    tick_physics(&mut world);
    assert!(approx_eq(world.get::<MapPosition>(e).unwrap().pos.y, 4.5));
}

// ==================== follow_claw_system ====================

#[test]
fn held_item_follows_claw_with_offset() {
    let mut world = make_world(0.1);
    let settings = CraneConfig::arcade().validate().unwrap();
    let claw = spawn_claw(&mut world, settings);
    let item = spawn_collectible(&mut world, Vec3::ZERO, POINTS_TAG);
    world
        .entity_mut(item)
        .insert(HeldBy::new(claw, Vec3::new(0.25, -0.5, 0.0)));

    world.get_mut::<MapPosition>(claw).unwrap().pos = Vec3::new(-3.0, 12.0, 1.0);
    tick_follow(&mut world);

    let pos = world.get::<MapPosition>(item).unwrap().pos;
    assert!(approx_eq(pos.x, -2.75));
    assert!(approx_eq(pos.y, 11.5));
    assert!(approx_eq(pos.z, 1.0));
}

#[test]
fn follower_of_missing_claw_stays_put() {
    let mut world = make_world(0.1);
    let gone = world.spawn(Claw::new(CraneConfig::arcade().validate().unwrap())).id();
    world.despawn(gone);
    let item = spawn_collectible(&mut world, Vec3::new(1.0, 2.0, 3.0), POINTS_TAG);
    world.entity_mut(item).insert(HeldBy::new(gone, Vec3::ZERO));

    tick_follow(&mut world);
    assert_eq!(world.get::<MapPosition>(item).unwrap().pos, Vec3::new(1.0, 2.0, 3.0));
}

// ==================== collection_zone_system ====================

#[test]
fn zone_fires_once_per_entry() {
    let mut world = make_world(0.1);
    world.spawn(Observer::new(count_enters));
    world.flush();
    spawn_collection_zone(&mut world, Vec3::ZERO, Vec3::splat(1.0), POINTS_TAG, 100);
    let e = spawn_collectible(&mut world, Vec3::new(0.0, 0.5, 0.0), POINTS_TAG);

    tick_zone(&mut world);
    tick_zone(&mut world);
    assert_eq!(world.resource::<EnterCount>().0, 1);

    // Leave and come back.
    world.get_mut::<MapPosition>(e).unwrap().pos = Vec3::new(10.0, 0.0, 0.0);
    tick_zone(&mut world);
    world.get_mut::<MapPosition>(e).unwrap().pos = Vec3::new(0.5, 0.0, 0.0);
    tick_zone(&mut world);
    assert_eq!(world.resource::<EnterCount>().0, 2);
}

#[test]
fn zone_ignores_carried_items() {
    let mut world = make_world(0.1);
    world.spawn(Observer::new(count_enters));
    world.flush();
    spawn_collection_zone(&mut world, Vec3::ZERO, Vec3::splat(1.0), POINTS_TAG, 100);
    let claw = world.spawn(MapPosition::new(0.0, 0.5, 0.0)).id();
    let e = spawn_collectible(&mut world, Vec3::ZERO, POINTS_TAG);
    world.entity_mut(e).insert(HeldBy::new(claw, Vec3::ZERO));

    tick_zone(&mut world);
    assert_eq!(world.resource::<EnterCount>().0, 0);
}

#[test]
fn zone_touching_sphere_counts_as_inside() {
    let mut world = make_world(0.1);
    world.spawn(Observer::new(count_enters));
    world.flush();
    spawn_collection_zone(&mut world, Vec3::ZERO, Vec3::splat(1.0), POINTS_TAG, 100);
    // Surface exactly on the top face.
    spawn_collectible(&mut world, Vec3::new(0.0, 1.5, 0.0), POINTS_TAG);
    // Hovering just above it.
    spawn_collectible(&mut world, Vec3::new(0.0, 1.6, 0.0), POINTS_TAG);

    tick_zone(&mut world);
    assert_eq!(world.resource::<EnterCount>().0, 1);
}

// ==================== scoring observers ====================

#[test]
fn tagged_entry_scores_and_despawns() {
    let mut world = make_world(0.1);
    with_scoring(&mut world);
    spawn_collection_zone(&mut world, Vec3::ZERO, Vec3::splat(1.0), POINTS_TAG, 100);
    let e = spawn_collectible(&mut world, Vec3::ZERO, POINTS_TAG);

    tick_zone(&mut world);

    assert_eq!(world.resource::<Score>().total(), 100);
    assert_eq!(world.resource::<ScoreDisplay>().text(), "Score: 100");
    assert_eq!(world.resource::<ScoreEvents>().0, vec![(100, 100)]);
    assert!(world.get_entity(e).is_err());
}

#[test]
fn untagged_entry_is_ignored() {
    let mut world = make_world(0.1);
    with_scoring(&mut world);
    spawn_collection_zone(&mut world, Vec3::ZERO, Vec3::splat(1.0), POINTS_TAG, 100);
    let rock = spawn_collectible(&mut world, Vec3::ZERO, "Rock");
    let bare = world
        .spawn((MapPosition::new(0.0, 0.0, 0.0), RigidBody::new()))
        .id();

    tick_zone(&mut world);

    assert_eq!(world.resource::<Score>().total(), 0);
    assert_eq!(world.resource::<ScoreDisplay>().text(), "Score: 0");
    assert!(world.resource::<ScoreEvents>().0.is_empty());
    assert!(world.get_entity(rock).is_ok());
    assert!(world.get_entity(bare).is_ok());
}

#[test]
fn several_items_accumulate() {
    let mut world = make_world(0.1);
    with_scoring(&mut world);
    spawn_collection_zone(&mut world, Vec3::ZERO, Vec3::splat(1.0), POINTS_TAG, 100);
    spawn_collectible(&mut world, Vec3::new(-0.5, 0.0, 0.0), POINTS_TAG);
    spawn_collectible(&mut world, Vec3::new(0.5, 0.0, 0.0), POINTS_TAG);
    tick_zone(&mut world);
    spawn_collectible(&mut world, Vec3::ZERO, POINTS_TAG);
    tick_zone(&mut world);

    assert_eq!(world.resource::<Score>().total(), 300);
    assert_eq!(world.resource::<ScoreDisplay>().text(), "Score: 300");
    let totals: Vec<u32> = world
        .resource::<ScoreEvents>()
        .0
        .iter()
        .map(|(_, total)| *total)
        .collect();
    assert_eq!(totals, vec![100, 200, 300]);
}

#[test]
fn zone_points_come_from_the_zone() {
    let mut world = make_world(0.1);
    with_scoring(&mut world);
    world.spawn((
        MapPosition::new(0.0, 0.0, 0.0),
        CollectionZone::new(Vec3::splat(1.0), "Gem", 250),
    ));
    world.spawn((
        MapPosition::new(0.0, 0.0, 0.0),
        RigidBody::new(),
        Tag::new("Gem"),
    ));

    tick_zone(&mut world);
    assert_eq!(world.resource::<Score>().total(), 250);
}

#[test]
fn scoring_without_display_does_not_panic() {
    let mut world = make_world(0.1);
    world.remove_resource::<ScoreDisplay>();
    with_scoring(&mut world);
    spawn_collection_zone(&mut world, Vec3::ZERO, Vec3::splat(1.0), POINTS_TAG, 100);
    spawn_collectible(&mut world, Vec3::ZERO, POINTS_TAG);

    tick_zone(&mut world);
    assert_eq!(world.resource::<Score>().total(), 100);
}
