//! Crane configuration resource.
//!
//! Author-time tuning for the claw and the collection zone, loaded from an INI
//! file. Values missing from the file keep their defaults, except waypoints,
//! which have no default and must be configured.
//!
//! # Configuration File Format
//!
//! ```ini
//! [claw]
//! move_speed = 5
//! min_x = -5
//! max_x = 5
//! drop_speed = 2
//! return_speed = 5
//! lift_height = 18
//! grab_radius = 0.5
//! pause_seconds = 0.5
//! collectible_tag = Points
//!
//! [waypoints]
//! drop_start = 0, 10, 0
//! drop_end = 0, 1, 0
//! drop_off = -7, 18, 0
//! home = 0, 10, 0
//!
//! [score]
//! per_item = 100
//!
//! [zone]
//! center = -7, 1.5, 0
//! half_extents = 1.5, 1.5, 1.5
//!
//! [physics]
//! gravity = -9.81
//! floor_y = 0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec3;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::claw::ClawSettings;
use crate::components::tag::POINTS_TAG;

const DEFAULT_MOVE_SPEED: f32 = 5.0;
const DEFAULT_MIN_X: f32 = -5.0;
const DEFAULT_MAX_X: f32 = 5.0;
const DEFAULT_DROP_SPEED: f32 = 2.0;
const DEFAULT_RETURN_SPEED: f32 = 5.0;
const DEFAULT_LIFT_HEIGHT: f32 = 18.0;
const DEFAULT_GRAB_RADIUS: f32 = 0.5;
const DEFAULT_PAUSE_SECONDS: f32 = 0.5;
const DEFAULT_SCORE_PER_ITEM: u32 = 100;
const DEFAULT_ZONE_HALF_EXTENT: f32 = 1.5;
const DEFAULT_GRAVITY: f32 = -9.81;
const DEFAULT_FLOOR_Y: f32 = 0.0;
const DEFAULT_CONFIG_PATH: &str = "./clawcrane.ini";

/// Configuration errors raised before the session starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("failed to save config file {path:?}: {reason}")]
    Save { path: PathBuf, reason: String },

    #[error("invalid value for [{section}] {key}: {reason}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        reason: String,
    },

    #[error("waypoint `{0}` is not configured")]
    MissingWaypoint(&'static str),

    #[error("`{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("horizontal bounds are inverted: min_x {min_x} > max_x {max_x}")]
    InvertedBounds { min_x: f32, max_x: f32 },

    #[error("`{name}` must be a finite number")]
    NonFinite { name: &'static str },
}

/// Crane configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CraneConfig {
    pub move_speed: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub drop_speed: f32,
    pub return_speed: f32,
    pub lift_height: f32,
    pub grab_radius: f32,
    pub pause_seconds: f32,
    pub collectible_tag: String,
    pub drop_start: Option<Vec3>,
    pub drop_end: Option<Vec3>,
    pub drop_off: Option<Vec3>,
    pub home: Option<Vec3>,
    pub score_per_item: u32,
    /// Collection zone centre; defaults to the floor below the drop-off.
    pub zone_center: Option<Vec3>,
    pub zone_half_extents: Vec3,
    /// Vertical gravity acceleration applied to released collectibles.
    pub gravity: f32,
    pub floor_y: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for CraneConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CraneConfig {
    /// Defaults for every tunable; waypoints are left unset.
    pub fn new() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            min_x: DEFAULT_MIN_X,
            max_x: DEFAULT_MAX_X,
            drop_speed: DEFAULT_DROP_SPEED,
            return_speed: DEFAULT_RETURN_SPEED,
            lift_height: DEFAULT_LIFT_HEIGHT,
            grab_radius: DEFAULT_GRAB_RADIUS,
            pause_seconds: DEFAULT_PAUSE_SECONDS,
            collectible_tag: POINTS_TAG.to_string(),
            drop_start: None,
            drop_end: None,
            drop_off: None,
            home: None,
            score_per_item: DEFAULT_SCORE_PER_ITEM,
            zone_center: None,
            zone_half_extents: Vec3::splat(DEFAULT_ZONE_HALF_EXTENT),
            gravity: DEFAULT_GRAVITY,
            floor_y: DEFAULT_FLOOR_Y,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// The stock cabinet layout: a pit spanning the claw's travel and a chute
    /// to the left, past the wall.
    pub fn arcade() -> Self {
        Self {
            drop_start: Some(Vec3::new(0.0, 10.0, 0.0)),
            drop_end: Some(Vec3::new(0.0, 1.0, 0.0)),
            drop_off: Some(Vec3::new(-7.0, 18.0, 0.0)),
            home: Some(Vec3::new(0.0, 10.0, 0.0)),
            ..Self::new()
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|reason| ConfigError::Load {
                path: self.config_path.clone(),
                reason,
            })?;
        self.apply_ini(&ini)?;

        info!(
            "Loaded config from {:?}: move_speed={}, bounds=[{}, {}], drop_speed={}, return_speed={}, per_item={}",
            self.config_path,
            self.move_speed,
            self.min_x,
            self.max_x,
            self.drop_speed,
            self.return_speed,
            self.score_per_item
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(|reason| ConfigError::Load {
                path: self.config_path.clone(),
                reason,
            })?;
        self.apply_ini(&ini)
    }

    fn apply_ini(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [claw] section
        read_f32(ini, "claw", "move_speed", &mut self.move_speed)?;
        read_f32(ini, "claw", "min_x", &mut self.min_x)?;
        read_f32(ini, "claw", "max_x", &mut self.max_x)?;
        read_f32(ini, "claw", "drop_speed", &mut self.drop_speed)?;
        read_f32(ini, "claw", "return_speed", &mut self.return_speed)?;
        read_f32(ini, "claw", "lift_height", &mut self.lift_height)?;
        read_f32(ini, "claw", "grab_radius", &mut self.grab_radius)?;
        read_f32(ini, "claw", "pause_seconds", &mut self.pause_seconds)?;
        if let Some(tag) = ini.get("claw", "collectible_tag") {
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: "claw",
                    key: "collectible_tag",
                    reason: "empty tag".to_string(),
                });
            }
            self.collectible_tag = tag.to_string();
        }

        // [waypoints] section
        read_vec3(ini, "waypoints", "drop_start", &mut self.drop_start)?;
        read_vec3(ini, "waypoints", "drop_end", &mut self.drop_end)?;
        read_vec3(ini, "waypoints", "drop_off", &mut self.drop_off)?;
        read_vec3(ini, "waypoints", "home", &mut self.home)?;

        // [score] section
        match ini.getuint("score", "per_item") {
            Ok(Some(points)) => {
                self.score_per_item =
                    u32::try_from(points).map_err(|e| ConfigError::InvalidValue {
                        section: "score",
                        key: "per_item",
                        reason: e.to_string(),
                    })?;
            }
            Ok(None) => {}
            Err(reason) => {
                return Err(ConfigError::InvalidValue {
                    section: "score",
                    key: "per_item",
                    reason,
                });
            }
        }

        // [zone] section
        read_vec3(ini, "zone", "center", &mut self.zone_center)?;
        let mut half_extents = None;
        read_vec3(ini, "zone", "half_extents", &mut half_extents)?;
        if let Some(half_extents) = half_extents {
            self.zone_half_extents = half_extents;
        }

        // [physics] section
        read_f32(ini, "physics", "gravity", &mut self.gravity)?;
        read_f32(ini, "physics", "floor_y", &mut self.floor_y)?;

        Ok(())
    }

    /// Save configuration to the INI file at `config_path`.
    ///
    /// Unset waypoints are omitted.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();

        ini.set("claw", "move_speed", Some(self.move_speed.to_string()));
        ini.set("claw", "min_x", Some(self.min_x.to_string()));
        ini.set("claw", "max_x", Some(self.max_x.to_string()));
        ini.set("claw", "drop_speed", Some(self.drop_speed.to_string()));
        ini.set("claw", "return_speed", Some(self.return_speed.to_string()));
        ini.set("claw", "lift_height", Some(self.lift_height.to_string()));
        ini.set("claw", "grab_radius", Some(self.grab_radius.to_string()));
        ini.set("claw", "pause_seconds", Some(self.pause_seconds.to_string()));
        ini.set("claw", "collectible_tag", Some(self.collectible_tag.clone()));

        let waypoints = [
            ("drop_start", self.drop_start),
            ("drop_end", self.drop_end),
            ("drop_off", self.drop_off),
            ("home", self.home),
        ];
        for (key, value) in waypoints {
            if let Some(v) = value {
                ini.set("waypoints", key, Some(format_vec3(v)));
            }
        }

        ini.set("score", "per_item", Some(self.score_per_item.to_string()));

        if let Some(center) = self.zone_center {
            ini.set("zone", "center", Some(format_vec3(center)));
        }
        ini.set(
            "zone",
            "half_extents",
            Some(format_vec3(self.zone_half_extents)),
        );

        ini.set("physics", "gravity", Some(self.gravity.to_string()));
        ini.set("physics", "floor_y", Some(self.floor_y.to_string()));

        ini.write(&self.config_path)
            .map_err(|e| ConfigError::Save {
                path: self.config_path.clone(),
                reason: e.to_string(),
            })?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    /// Check every setting and produce the claw's runtime settings.
    pub fn validate(&self) -> Result<ClawSettings, ConfigError> {
        let positives = [
            ("move_speed", self.move_speed),
            ("drop_speed", self.drop_speed),
            ("return_speed", self.return_speed),
            ("grab_radius", self.grab_radius),
            ("pause_seconds", self.pause_seconds),
            ("zone_half_extents.x", self.zone_half_extents.x),
            ("zone_half_extents.y", self.zone_half_extents.y),
            ("zone_half_extents.z", self.zone_half_extents.z),
        ];
        for (name, value) in positives {
            // Written this way round so NaN is rejected too.
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(self.min_x <= self.max_x) {
            return Err(ConfigError::InvertedBounds {
                min_x: self.min_x,
                max_x: self.max_x,
            });
        }
        let finites = [
            ("min_x", self.min_x),
            ("max_x", self.max_x),
            ("lift_height", self.lift_height),
            ("gravity", self.gravity),
            ("floor_y", self.floor_y),
        ];
        for (name, value) in finites {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
        }
        if self.zone_center.is_some_and(|c| !c.is_finite()) {
            return Err(ConfigError::NonFinite {
                name: "zone_center",
            });
        }

        Ok(ClawSettings {
            move_speed: self.move_speed,
            min_x: self.min_x,
            max_x: self.max_x,
            drop_speed: self.drop_speed,
            return_speed: self.return_speed,
            lift_height: self.lift_height,
            grab_radius: self.grab_radius,
            pause_seconds: self.pause_seconds,
            collectible_tag: self.collectible_tag.clone(),
            drop_start: require(self.drop_start, "drop_start")?,
            drop_end: require(self.drop_end, "drop_end")?,
            drop_off: require(self.drop_off, "drop_off")?,
            home: require(self.home, "home")?,
        })
    }

    /// Where the collection zone sits for validated `settings`.
    pub fn zone_center_for(&self, settings: &ClawSettings) -> Vec3 {
        self.zone_center.unwrap_or(Vec3::new(
            settings.drop_off.x,
            self.floor_y + self.zone_half_extents.y.abs(),
            settings.drop_off.z,
        ))
    }
}

fn require(value: Option<Vec3>, name: &'static str) -> Result<Vec3, ConfigError> {
    let waypoint = value.ok_or(ConfigError::MissingWaypoint(name))?;
    if !waypoint.is_finite() {
        return Err(ConfigError::NonFinite { name });
    }
    Ok(waypoint)
}

fn read_f32(
    ini: &Ini,
    section: &'static str,
    key: &'static str,
    slot: &mut f32,
) -> Result<(), ConfigError> {
    match ini.getfloat(section, key) {
        Ok(Some(value)) => {
            *slot = value as f32;
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(reason) => Err(ConfigError::InvalidValue {
            section,
            key,
            reason,
        }),
    }
}

fn read_vec3(
    ini: &Ini,
    section: &'static str,
    key: &'static str,
    slot: &mut Option<Vec3>,
) -> Result<(), ConfigError> {
    if let Some(text) = ini.get(section, key) {
        let v = parse_vec3(&text).map_err(|reason| ConfigError::InvalidValue {
            section,
            key,
            reason,
        })?;
        *slot = Some(v);
    }
    Ok(())
}

/// Parse `"x, y, z"`.
pub fn parse_vec3(text: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected `x, y, z`, got `{}`", text.trim()));
    }
    let mut xyz = [0.0f32; 3];
    for (slot, part) in xyz.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f32>()
            .map_err(|e| format!("`{}`: {}", part, e))?;
    }
    Ok(Vec3::from_array(xyz))
}

fn format_vec3(v: Vec3) -> String {
    format!("{}, {}, {}", v.x, v.y, v.z)
}
