//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected, seedable RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod pool;
pub mod state;
pub mod tick;

pub use body::{Body, BodyKind, Direction, Drive, InputFlags, MotionPolicy, decay_toward_zero};
pub use collision::{Aabb, overlaps};
pub use pool::ObstaclePool;
pub use state::{BANNER_ID, GamePhase, GameState, PLAYER_ID};
pub use tick::{DirectionChange, TickInput, sanitize_dt, tick};
