//! End-to-end crane sessions driven through `CraneGame`.

use glam::Vec3;

use clawcrane::components::claw::{CraneState, POINT_TOLERANCE};
use clawcrane::components::clawanimator::{AnimationTrigger, ClawAnimator};
use clawcrane::components::heldby::HeldBy;
use clawcrane::components::mapposition::MapPosition;
use clawcrane::components::rigidbody::RigidBody;
use clawcrane::components::spherecollider::SphereCollider;
use clawcrane::components::tag::Tag;
use clawcrane::game::CraneGame;
use clawcrane::resources::craneconfig::{ConfigError, CraneConfig};

const DT: f32 = 0.02;
const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn new_game() -> CraneGame {
    CraneGame::new(&CraneConfig::arcade()).unwrap()
}

fn steer_to(game: &mut CraneGame, x: f32) {
    let move_speed = game.claw_settings().move_speed;
    for _ in 0..1000 {
        let dx = x - game.claw_position().x;
        if dx.abs() < 1e-4 {
            return;
        }
        game.tick(DT, (dx / (move_speed * DT)).clamp(-1.0, 1.0), false);
    }
    panic!("claw never reached x = {x}");
}

/// Press activate, then tick until the claw is controllable again.
/// Returns the sequence of distinct top-level states seen.
fn run_cycle(game: &mut CraneGame) -> Vec<&'static str> {
    let mut seen = vec![game.claw_state().name()];
    game.tick(DT, 0.0, true);
    for _ in 0..5000 {
        let name = game.claw_state().name();
        if seen.last() != Some(&name) {
            seen.push(name);
        }
        if game.claw_state() == CraneState::Controllable {
            return seen;
        }
        game.tick(DT, 0.0, false);
    }
    panic!("cycle did not finish: {:?}", seen);
}

fn idle(game: &mut CraneGame, frames: u32) {
    for _ in 0..frames {
        game.tick(DT, 0.0, false);
    }
}

#[test]
fn full_cycle_collects_item_and_scores_once() {
    let mut game = new_game();
    let item = game.spawn_collectible(Vec3::new(2.0, 0.5, 0.0));
    steer_to(&mut game, 2.0);

    let mut saw_holding = false;
    let mut score_changes = 0;
    let mut last_score = game.score();
    let mut seen = vec![game.claw_state().name()];

    game.tick(DT, 0.0, true);
    for _ in 0..1000 {
        let name = game.claw_state().name();
        if seen.last() != Some(&name) {
            seen.push(name);
        }
        saw_holding |= game.held_item() == Some(item);
        if game.score() != last_score {
            score_changes += 1;
            last_score = game.score();
        }
        game.tick(DT, 0.0, false);
    }

    assert_eq!(
        seen,
        vec![
            "Controllable",
            "Dropping",
            "ReturningUp",
            "MovingLeft",
            "DroppingOff",
            "ReturningHome",
            "Controllable"
        ]
    );
    assert!(saw_holding, "claw should have carried the item");
    assert_eq!(game.held_item(), None);
    assert_eq!(score_changes, 1);
    assert_eq!(game.score(), 100);
    assert_eq!(game.score_text(), "Score: 100");
    assert!(game.world().get_entity(item).is_err(), "collected item is despawned");
}

#[test]
fn empty_drop_returns_without_item() {
    let mut game = new_game();
    let far = game.spawn_collectible(Vec3::new(4.0, 0.5, 0.0));
    steer_to(&mut game, -2.0);

    let seen = run_cycle(&mut game);
    assert_eq!(seen.len(), 7);
    assert_eq!(game.held_item(), None);
    idle(&mut game, 200);

    assert_eq!(game.score(), 0);
    let pos = game.world().get::<MapPosition>(far).unwrap().pos;
    assert!(approx_eq(pos.x, 4.0));
    assert!(game.world().get::<HeldBy>(far).is_none());
}

#[test]
fn untagged_body_under_claw_is_not_grabbed() {
    let mut game = new_game();
    let rock = game
        .world_mut()
        .spawn((
            MapPosition::new(0.0, 0.5, 0.0),
            RigidBody::with_gravity(Vec3::new(0.0, -9.81, 0.0)),
            SphereCollider::new(0.5),
            Tag::new("Rock"),
        ))
        .id();

    game.tick(DT, 0.0, true);
    let mut ever_held = false;
    for _ in 0..150 {
        game.tick(DT, 0.0, false);
        ever_held |= game.held_item().is_some();
    }

    assert!(!ever_held);
    assert_eq!(game.held_item(), None);
    assert!(game.world().get::<HeldBy>(rock).is_none());
    let pos = game.world().get::<MapPosition>(rock).unwrap().pos;
    assert!(approx_eq(pos.x, 0.0));
    assert!(approx_eq(pos.y, 0.5));
}

#[test]
fn claw_returns_home_after_cycle() {
    let mut game = new_game();
    steer_to(&mut game, 3.0);
    run_cycle(&mut game);
    let home = game.claw_settings().home;
    assert!(game.claw_position().distance(home) < POINT_TOLERANCE);
}

#[test]
fn claw_holds_at_most_one_item() {
    let mut game = new_game();
    let a = game.spawn_collectible(Vec3::new(1.0, 0.5, 0.0));
    let b = game.spawn_collectible(Vec3::new(1.2, 0.5, 0.0));
    steer_to(&mut game, 1.0);

    game.tick(DT, 0.0, true);
    let mut max_held = 0;
    // Three seconds in the claw is still lifting its catch.
    for _ in 0..150 {
        game.tick(DT, 0.0, false);
        let mut q = game.world_mut().query::<&HeldBy>();
        let held = q.iter(game.world()).count();
        max_held = max_held.max(held);
    }

    assert_eq!(max_held, 1);
    assert_eq!(game.held_item(), Some(a), "nearest item is grabbed");
    assert!(game.world().get::<HeldBy>(b).is_none());
}

#[test]
fn animator_receives_cycle_triggers_in_order() {
    let mut game = new_game();
    game.spawn_collectible(Vec3::new(0.0, 0.5, 0.0));
    run_cycle(&mut game);

    let claw = game.claw();
    let triggers = game
        .world_mut()
        .get_mut::<ClawAnimator>(claw)
        .unwrap()
        .take_pending();
    assert_eq!(
        triggers,
        vec![
            AnimationTrigger::Open,
            AnimationTrigger::Close,
            AnimationTrigger::Open,
            AnimationTrigger::Idle
        ]
    );
}

#[test]
fn claw_without_animator_still_cycles() {
    let mut game = new_game();
    let claw = game.claw();
    game.world_mut().entity_mut(claw).remove::<ClawAnimator>();

    let seen = run_cycle(&mut game);
    assert_eq!(seen.last(), Some(&"Controllable"));
}

#[test]
fn horizontal_input_never_leaves_bounds() {
    let mut game = new_game();
    let (min_x, max_x) = {
        let s = game.claw_settings();
        (s.min_x, s.max_x)
    };
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..2000 {
        let axis = rng.f32() * 4.0 - 2.0;
        let dt = rng.f32() * 0.5;
        game.tick(dt, axis, false);
        let x = game.claw_position().x;
        assert!(x >= min_x && x <= max_x, "x = {x} escaped [{min_x}, {max_x}]");
    }
    assert_eq!(game.claw_state(), CraneState::Controllable);
}

#[test]
fn untagged_body_in_chute_scores_nothing() {
    let mut game = new_game();
    let rock = game
        .world_mut()
        .spawn((
            MapPosition::new(-7.0, 8.0, 0.0),
            RigidBody::with_gravity(Vec3::new(0.0, -9.81, 0.0)),
            Tag::new("Rock"),
        ))
        .id();
    let prize = game.spawn_collectible(Vec3::new(-7.0, 8.0, 0.0));

    idle(&mut game, 200);

    assert_eq!(game.score(), 100);
    assert!(game.world().get_entity(prize).is_err());
    assert!(game.world().get_entity(rock).is_ok());
}

#[test]
fn restart_resets_score() {
    let mut game = new_game();
    game.spawn_collectible(Vec3::new(-7.0, 6.0, 0.0));
    idle(&mut game, 150);
    assert_eq!(game.score(), 100);

    game.restart().unwrap();
    assert_eq!(game.score(), 0);
    assert_eq!(game.score_text(), "Score: 0");
    assert!(game.collectibles().is_empty());
}

#[test]
fn invalid_config_fails_at_startup() {
    let mut config = CraneConfig::arcade();
    config.drop_off = None;
    assert_eq!(
        CraneGame::new(&config).err(),
        Some(ConfigError::MissingWaypoint("drop_off"))
    );

    let mut config = CraneConfig::arcade();
    config.move_speed = -1.0;
    assert!(matches!(
        CraneGame::new(&config),
        Err(ConfigError::NonPositive {
            name: "move_speed",
            ..
        })
    ));

    let mut config = CraneConfig::arcade();
    config
        .load_from_str("[claw]\nlift_height = NaN\n")
        .unwrap();
    assert_eq!(
        CraneGame::new(&config).err(),
        Some(ConfigError::NonFinite {
            name: "lift_height"
        })
    );
}
