//! Axis-aligned bounding box overlap
//!
//! Boxes are half-open: a body covers `[x, x + width) x [y, y + height)`, so
//! two boxes that only share an edge do not collide.

use serde::{Deserialize, Serialize};

use super::body::Body;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            right: x + width,
            top: y,
            bottom: y + height,
        }
    }

    pub fn from_body(body: &Body) -> Self {
        Self {
            left: body.pos.x,
            right: body.right(),
            top: body.pos.y,
            bottom: body.bottom(),
        }
    }

    /// True unless a separating axis exists. Equal edges separate.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.bottom <= other.top {
            return false;
        }
        if self.top >= other.bottom {
            return false;
        }
        if self.right <= other.left {
            return false;
        }
        if self.left >= other.right {
            return false;
        }
        true
    }
}

/// Check whether two bodies' boxes overlap
#[inline]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    Aabb::from_body(a).overlaps(&Aabb::from_body(b))
}
