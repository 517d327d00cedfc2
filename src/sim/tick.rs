//! Simulation tick
//!
//! Advances the game by one step: apply input, integrate the player, update
//! the obstacle pool, check for a collision, transition.

use rand::Rng;

use super::body::Direction;
use super::state::{GamePhase, GameState};

/// A held direction starting or stopping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionChange {
    pub direction: Direction,
    pub pressed: bool,
}

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Direction changes in arrival order
    pub changes: Vec<DirectionChange>,
    /// Quit requested (handled by the host loop, not the simulation)
    pub quit: bool,
}

impl TickInput {
    pub fn press(direction: Direction) -> Self {
        Self {
            changes: vec![DirectionChange {
                direction,
                pressed: true,
            }],
            quit: false,
        }
    }

    pub fn release(direction: Direction) -> Self {
        Self {
            changes: vec![DirectionChange {
                direction,
                pressed: false,
            }],
            quit: false,
        }
    }
}

/// Clamp a raw delta-time into `[0, max_delta]`.
///
/// NaN, infinite and negative values become zero (the tick still runs, but
/// nothing moves).
pub fn sanitize_dt(dt: f32, max_delta: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Discarding invalid delta-time {}", dt);
        return 0.0;
    }
    dt.min(max_delta)
}

/// Advance the game state by one tick. Returns the phase after the tick.
///
/// Once the phase is `Over` this is a no-op.
pub fn tick<R: Rng>(state: &mut GameState<R>, input: &TickInput, dt: f32) -> GamePhase {
    if state.phase == GamePhase::Over {
        return GamePhase::Over;
    }

    for change in &input.changes {
        state.player.set_input(change.direction, change.pressed);
    }

    let dt = sanitize_dt(dt, state.config.max_delta);
    state.player.integrate(dt);
    state.obstacles.update(dt, &mut state.rng);

    state.time_ticks += 1;
    state.elapsed += dt;

    let hit = state.obstacles.first_hit(&state.player).map(|b| b.id);
    if let Some(id) = hit {
        log::info!(
            "Player hit by obstacle {} after {:.2}s ({} ticks)",
            id,
            state.elapsed,
            state.time_ticks
        );
        state.end();
    }

    state.phase
}
