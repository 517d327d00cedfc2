//! Kinematic bodies and motion integration

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Visual kind handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Player,
    Obstacle,
    GameOver,
}

/// Directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Held directions for a driven body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFlags {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl InputFlags {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
        }
    }
}

/// Acceleration/drag state of a player-driven body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    /// pixels/second/second per held direction
    pub acceleration: f32,
    /// pixels/second/second toward rest on an idle axis
    pub drag: f32,
    pub input: InputFlags,
}

impl Drive {
    pub fn new(acceleration: f32, drag: f32) -> Self {
        Self {
            acceleration,
            drag,
            input: InputFlags::default(),
        }
    }

    /// New velocity after `dt` seconds of input or drag.
    ///
    /// Axes are independent: diagonal input is not normalized.
    pub fn apply(&self, vel: Vec2, dt: f32) -> Vec2 {
        let step = self.acceleration * dt;
        let decay = self.drag * dt;
        let input = &self.input;

        let vx = if input.left || input.right {
            let mut vx = vel.x;
            if input.left {
                vx -= step;
            }
            if input.right {
                vx += step;
            }
            vx
        } else {
            decay_toward_zero(vel.x, decay)
        };

        let vy = if input.up || input.down {
            let mut vy = vel.y;
            if input.up {
                vy -= step;
            }
            if input.down {
                vy += step;
            }
            vy
        } else {
            decay_toward_zero(vel.y, decay)
        };

        Vec2::new(vx, vy)
    }
}

/// Reduce |v| by `amount`, snapping to exactly zero instead of crossing it
#[inline]
pub fn decay_toward_zero(v: f32, amount: f32) -> f32 {
    if amount >= v.abs() {
        0.0
    } else {
        v - amount * v.signum()
    }
}

/// How a body's velocity evolves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionPolicy {
    /// Input-driven acceleration with drag
    Driven(Drive),
    /// Constant velocity
    Ballistic,
    /// Never moves
    Static,
}

/// A simulated entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub kind: BodyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub motion: MotionPolicy,
}

impl Body {
    /// Player body at rest
    pub fn driven(id: u32, pos: Vec2, width: f32, height: f32, drive: Drive) -> Self {
        Self {
            id,
            kind: BodyKind::Player,
            pos,
            vel: Vec2::ZERO,
            width,
            height,
            motion: MotionPolicy::Driven(drive),
        }
    }

    pub fn ballistic(id: u32, pos: Vec2, vel: Vec2, width: f32, height: f32) -> Self {
        Self {
            id,
            kind: BodyKind::Obstacle,
            pos,
            vel,
            width,
            height,
            motion: MotionPolicy::Ballistic,
        }
    }

    pub fn fixed(id: u32, kind: BodyKind, pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            width,
            height,
            motion: MotionPolicy::Static,
        }
    }

    /// Update held directions (driven bodies only)
    pub fn set_input(&mut self, direction: Direction, held: bool) {
        if let MotionPolicy::Driven(drive) = &mut self.motion {
            drive.input.set(direction, held);
        }
    }

    pub fn input(&self) -> Option<InputFlags> {
        match self.motion {
            MotionPolicy::Driven(drive) => Some(drive.input),
            _ => None,
        }
    }

    /// Advance by `dt` seconds: new velocity first, then position from it.
    ///
    /// `dt` must already be sanitized (finite, non-negative).
    pub fn integrate(&mut self, dt: f32) {
        if dt == 0.0 {
            return;
        }
        let vel = match &self.motion {
            MotionPolicy::Driven(drive) => drive.apply(self.vel, dt),
            MotionPolicy::Ballistic => self.vel,
            MotionPolicy::Static => return,
        };
        self.vel = vel;
        self.pos = self.pos + vel * dt;
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }
}
