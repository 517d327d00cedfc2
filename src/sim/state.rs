//! Game state and phases

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyKind, Drive};
use super::pool::ObstaclePool;
use crate::config::{ConfigError, GameConfig};

/// Entity id reserved for the player
pub const PLAYER_ID: u32 = 0;
/// Entity id reserved for the game over banner
pub const BANNER_ID: u32 = u32::MAX;
/// First id handed to spawned obstacles
const FIRST_OBSTACLE_ID: u32 = 1;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was hit; the simulation is frozen for good
    Over,
}

/// Complete simulation state. The RNG is injected so tests can seed it.
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub player: Body,
    pub obstacles: ObstaclePool,
    /// Static game over banner, present once the phase is `Over`
    pub banner: Option<Body>,
    /// Simulation tick counter (ticks while playing)
    pub time_ticks: u64,
    /// Simulated seconds survived
    pub elapsed: f32,
    pub(crate) rng: R,
}

impl GameState<Pcg32> {
    /// Create a new game with a seeded PCG stream
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create a new game drawing obstacle randomness from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let p = &config.player;
        let player = Body::driven(
            PLAYER_ID,
            Vec2::new(p.start_x, config.playfield.height / 2.0),
            p.width,
            p.height,
            Drive::new(p.acceleration, p.drag),
        );
        let obstacles =
            ObstaclePool::new(config.obstacles, config.playfield, FIRST_OBSTACLE_ID)?;

        Ok(Self {
            config,
            phase: GamePhase::Playing,
            player,
            obstacles,
            banner: None,
            time_ticks: 0,
            elapsed: 0.0,
            rng,
        })
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Everything the renderer should draw, back to front
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.obstacles
            .members
            .iter()
            .chain(std::iter::once(&self.player))
            .chain(self.banner.iter())
    }

    /// Enter the terminal phase and put up the banner. Idempotent.
    pub(crate) fn end(&mut self) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::Over;

        let field = &self.config.playfield;
        let size = &self.config.banner;
        let pos = Vec2::new(
            (field.width - size.width) / 2.0,
            (field.height - size.height) / 2.0,
        );
        self.banner = Some(Body::fixed(
            BANNER_ID,
            BodyKind::GameOver,
            pos,
            size.width,
            size.height,
        ));
    }
}
