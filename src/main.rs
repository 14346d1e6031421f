//! Claw crane headless session runner.
//!
//! Runs the minigame without a window: collectibles are scattered across the
//! pit, an autopilot steers the claw over the nearest one and presses the
//! drop button, and the final score is printed at the end.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --blocks 5 --frames 3600
//! cargo run --release -- --config clawcrane.ini --json
//! ```

use std::path::PathBuf;

use clap::Parser;
use clawcrane::components::claw::{ClawSettings, CraneState};
use clawcrane::game::{COLLECTIBLE_RADIUS, CraneGame};
use clawcrane::resources::craneconfig::CraneConfig;
use glam::Vec3;
use log::{error, info};
use serde::Serialize;

/// Claw crane minigame, headless session
#[derive(Parser)]
#[command(version, about = "Runs a headless claw crane session and reports the score.")]
struct Cli {
    /// INI file with crane settings. Defaults to the stock arcade layout.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Number of collectibles scattered in the pit.
    #[arg(long, default_value_t = 5)]
    blocks: u32,

    /// Seed for collectible placement.
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Print a JSON report instead of the score line.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct SessionReport {
    frames: u32,
    elapsed_seconds: f32,
    score: u32,
    collected: u32,
    remaining: u32,
    score_text: String,
}

/// Steers the claw over the nearest collectible and taps the drop button.
#[derive(Default)]
struct Autopilot {
    pressed: bool,
}

impl Autopilot {
    const ALIGNED: f32 = 0.05;

    fn control(&mut self, game: &mut CraneGame, dt: f32) -> (f32, bool) {
        if game.claw_state() != CraneState::Controllable {
            self.pressed = false;
            return (0.0, false);
        }
        let settings: ClawSettings = game.claw_settings().clone();
        let claw_x = game.claw_position().x;

        let target = game
            .collectibles()
            .into_iter()
            .map(|(_, pos)| pos.x)
            .filter(|x| (settings.min_x..=settings.max_x).contains(x))
            .min_by(|a, b| (a - claw_x).abs().total_cmp(&(b - claw_x).abs()));
        let Some(target) = target else {
            return (0.0, false);
        };

        let dx = target - claw_x;
        if dx.abs() > Self::ALIGNED {
            self.pressed = false;
            let full_step = settings.move_speed * dt;
            return ((dx / full_step).clamp(-1.0, 1.0), false);
        }
        let press = !self.pressed;
        self.pressed = true;
        (0.0, press)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CraneConfig::arcade();
    if let Some(path) = cli.config {
        config.config_path = path;
        config.load_from_file()?;
    }
    if let Some(path) = cli.write_config {
        config.config_path = path;
        config.save_to_file()?;
        println!("Config written to {}", config.config_path.display());
        return Ok(());
    }

    let mut game = CraneGame::new(&config)?;
    let settings = game.claw_settings().clone();

    let mut rng = fastrand::Rng::with_seed(cli.seed);
    let lo = settings.min_x + COLLECTIBLE_RADIUS;
    let span = (settings.max_x - settings.min_x - 2.0 * COLLECTIBLE_RADIUS).max(0.0);
    for _ in 0..cli.blocks {
        let x = lo + rng.f32() * span;
        game.spawn_collectible(Vec3::new(
            x,
            config.floor_y + COLLECTIBLE_RADIUS,
            settings.home.z,
        ));
    }
    info!("Scattered {} collectibles (seed {})", cli.blocks, cli.seed);

    let mut pilot = Autopilot::default();
    for _ in 0..cli.frames {
        let (horizontal, activate) = pilot.control(&mut game, cli.dt);
        game.tick(cli.dt, horizontal, activate);
    }

    let remaining = game.collectibles().len() as u32;
    let per_item = config.score_per_item.max(1);
    let report = SessionReport {
        frames: cli.frames,
        elapsed_seconds: cli.frames as f32 * cli.dt,
        score: game.score(),
        collected: game.score() / per_item,
        remaining,
        score_text: game.score_text().to_string(),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.score_text);
    }
    Ok(())
}
