//! CatalEyes - dodge the obstacles
//!
//! Core modules:
//! - `sim`: Simulation (bodies, collisions, obstacle pool, game state)
//! - `clock`: Frame pacing and delta-time
//! - `input`: Key code mapping
//! - `config`: Playfield and tuning configuration
//! - `app`: Host loop over external renderer/input collaborators

pub mod app;
pub mod clock;
pub mod config;
pub mod input;
pub mod sim;

pub use app::{App, AppError, InputSource, Renderer};
pub use clock::{Clock, FixedStep};
pub use config::{ConfigError, GameConfig};
pub use glam::Vec2;

/// Game configuration defaults
pub mod consts {
    /// Default playfield size in pixels
    pub const PLAYFIELD_WIDTH: f32 = 1024.0;
    pub const PLAYFIELD_HEIGHT: f32 = 768.0;

    /// Target update cadence
    pub const TARGET_HZ: u32 = 60;
    /// Longest delta-time handed to the simulation (avoids runaway integration after a stall)
    pub const MAX_DELTA: f32 = 1.0 / 15.0;
    /// Maximum fixed substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 20.0;
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_ACCEL: f32 = 1000.0; // pixels/second/second
    pub const PLAYER_DRAG: f32 = 700.0; // pixels/second/second

    /// Obstacle defaults
    pub const OBSTACLE_QUOTA: usize = 10;
    pub const OBSTACLE_SIZE: f32 = 32.0;
    pub const OBSTACLE_MIN_SPEED: f32 = 200.0;
    pub const OBSTACLE_MAX_SPEED: f32 = 600.0;

    /// Game over banner size
    pub const BANNER_WIDTH: f32 = 320.0;
    pub const BANNER_HEIGHT: f32 = 64.0;
}
