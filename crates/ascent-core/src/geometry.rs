use serde::{Deserialize, Serialize};

/// Penetration depth below which two boxes count as touching, not overlapping.
pub const CONTACT_EPSILON: f32 = 1e-3;

/// Axis-aligned bounding box stored as a centre point and half extents.
///
/// World coordinates are y-up: `bottom() < top()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub half_w: f32,
    pub half_h: f32,
}

impl Aabb {
    pub fn from_center(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            half_w: width / 2.0,
            half_h: height / 2.0,
        }
    }

    pub fn from_edges(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            x: (left + right) / 2.0,
            y: (bottom + top) / 2.0,
            half_w: (right - left) / 2.0,
            half_h: (top - bottom) / 2.0,
        }
    }

    pub fn left(&self) -> f32 {
        self.x - self.half_w
    }

    pub fn right(&self) -> f32 {
        self.x + self.half_w
    }

    pub fn bottom(&self) -> f32 {
        self.y - self.half_h
    }

    pub fn top(&self) -> f32 {
        self.y + self.half_h
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left + self.half_w;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.half_w;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom + self.half_h;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top - self.half_h;
    }

    /// A copy of this box shifted by `(dx, dy)`. Probes are built this way
    /// so the live shape is never moved to answer a hypothetical query.
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Strict overlap test: boxes that only share an edge (up to
    /// [`CONTACT_EPSILON`] of float noise) do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right() - other.left() > CONTACT_EPSILON
            && other.right() - self.left() > CONTACT_EPSILON
            && self.top() - other.bottom() > CONTACT_EPSILON
            && other.top() - self.bottom() > CONTACT_EPSILON
    }
}
