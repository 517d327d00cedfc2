//! Playfield and tuning configuration
//!
//! Everything the simulation needs to know about screen size, cadence and
//! balance is supplied here and threaded into each component. Loaded from
//! JSON; missing fields fall back to the defaults in [`crate::consts`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::input::KeyMap;

/// Configuration errors, surfaced once at construction
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("obstacle speed range is empty (min {min} > max {max})")]
    InvalidSpeedRange { min: f32, max: f32 },
    #[error("obstacle quota must be at least 1")]
    ZeroQuota,
}

/// How the host turns frame time into simulation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timestep {
    /// One step per frame with the clock's (capped) delta
    #[default]
    Variable,
    /// Accumulate frame time and step in fixed `1 / target_hz` increments
    Fixed,
}

/// Rectangular simulation bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("playfield.width", self.width)?;
        positive("playfield.height", self.height)
    }
}

/// Player body tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_x: f32,
    pub width: f32,
    pub height: f32,
    /// Velocity gained per second per held direction (pixels/s²)
    pub acceleration: f32,
    /// Velocity lost per second on an idle axis (pixels/s²)
    pub drag: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_x: PLAYER_START_X,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            acceleration: PLAYER_ACCEL,
            drag: PLAYER_DRAG,
        }
    }
}

/// Obstacle generator tuning. Doubles as the prototype for spawned bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Target steady-state population
    pub quota: usize,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed range (pixels/s); obstacles travel right-to-left
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            quota: OBSTACLE_QUOTA,
            width: OBSTACLE_SIZE,
            height: OBSTACLE_SIZE,
            min_speed: OBSTACLE_MIN_SPEED,
            max_speed: OBSTACLE_MAX_SPEED,
        }
    }
}

impl ObstacleConfig {
    /// Size and speed checks. A zero quota is allowed here (an empty pool is
    /// well-defined); the game config rejects it separately.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("obstacles.width", self.width)?;
        positive("obstacles.height", self.height)?;
        non_negative("obstacles.min_speed", self.min_speed)?;
        non_negative("obstacles.max_speed", self.max_speed)?;
        if self.min_speed > self.max_speed {
            return Err(ConfigError::InvalidSpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        Ok(())
    }
}

/// Game over banner size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            width: BANNER_WIDTH,
            height: BANNER_HEIGHT,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: Playfield,
    /// Target update cadence (Hz)
    pub target_hz: u32,
    /// Upper bound on a single delta-time (seconds)
    pub max_delta: f32,
    pub timestep: Timestep,
    /// Substep cap per frame in fixed mode
    pub max_substeps: u32,
    pub player: PlayerConfig,
    pub obstacles: ObstacleConfig,
    pub banner: BannerConfig,
    pub keys: KeyMap,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            target_hz: TARGET_HZ,
            max_delta: MAX_DELTA,
            timestep: Timestep::Variable,
            max_substeps: MAX_SUBSTEPS,
            player: PlayerConfig::default(),
            obstacles: ObstacleConfig::default(),
            banner: BannerConfig::default(),
            keys: KeyMap::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Seconds per update at the target cadence
    pub fn frame_time(&self) -> f32 {
        1.0 / self.target_hz as f32
    }

    /// Reject anything the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.playfield.validate()?;
        positive("target_hz", self.target_hz as f32)?;
        positive("max_delta", self.max_delta)?;
        positive("max_substeps", self.max_substeps as f32)?;

        finite("player.start_x", self.player.start_x)?;
        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        non_negative("player.acceleration", self.player.acceleration)?;
        non_negative("player.drag", self.player.drag)?;

        if self.obstacles.quota == 0 {
            return Err(ConfigError::ZeroQuota);
        }
        self.obstacles.validate()?;

        positive("banner.width", self.banner.width)?;
        positive("banner.height", self.banner.height)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            field,
            value: value as f64,
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative {
            field,
            value: value as f64,
        })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite {
            field,
            value: value as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_hz, 60);
        assert_eq!(config.obstacles.quota, 10);
        assert_eq!(config.obstacles.min_speed, 200.0);
        assert_eq!(config.obstacles.max_speed, 600.0);
        assert!((config.frame_time() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(
            r#"{ "playfield": { "width": 640, "height": 480 }, "obstacles": { "quota": 3 } }"#,
        )
        .unwrap();
        assert_eq!(config.playfield.width, 640.0);
        assert_eq!(config.playfield.height, 480.0);
        assert_eq!(config.obstacles.quota, 3);
        assert_eq!(config.obstacles.max_speed, OBSTACLE_MAX_SPEED);
        assert_eq!(config.player.drag, PLAYER_DRAG);
        assert_eq!(config.timestep, Timestep::Variable);
    }

    #[test]
    fn test_timestep_parses_lowercase() {
        let config = GameConfig::from_json(r#"{ "timestep": "fixed" }"#).unwrap();
        assert_eq!(config.timestep, Timestep::Fixed);
    }

    #[test]
    fn test_rejects_zero_quota() {
        let mut config = GameConfig::default();
        config.obstacles.quota = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroQuota)));
    }

    #[test]
    fn test_rejects_negative_dimensions() {
        let mut config = GameConfig::default();
        config.playfield.width = -10.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "playfield.width",
                ..
            })
        ));

        let mut config = GameConfig::default();
        config.obstacles.height = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "obstacles.height",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let mut config = GameConfig::default();
        config.player.drag = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "player.drag",
                ..
            })
        ));

        let mut config = GameConfig::default();
        config.obstacles.min_speed = 700.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeedRange { .. })
        ));

        let mut config = GameConfig::default();
        config.max_delta = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.target_hz = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.player.start_x = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        // Validation also runs on the JSON path
        assert!(matches!(
            GameConfig::from_json(r#"{ "obstacles": { "quota": 0 } }"#),
            Err(ConfigError::ZeroQuota)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
