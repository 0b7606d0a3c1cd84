//! Axis-aligned bounding boxes for hit testing and play-field bounds
//!
//! Every entity is a box centered on its position. Rotation never rotates
//! the box itself; a rotated body gets a larger axis-aligned box instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Play-field bounds anchored at the origin
    pub fn playfield(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Strict overlap; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// True if `other` lies entirely inside this box (edges inclusive)
    pub fn contains(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// Shift this box so it lies fully inside `bounds`
    ///
    /// A box larger than the bounds on an axis is centered on that axis.
    pub fn clamp_within(&self, bounds: &Rect) -> Rect {
        let size = self.size();
        let clamp_axis = |min: f32, extent: f32, lo: f32, hi: f32| {
            if extent >= hi - lo {
                lo + (hi - lo - extent) / 2.0
            } else {
                min.clamp(lo, hi - extent)
            }
        };
        let min = Vec2::new(
            clamp_axis(self.min.x, size.x, bounds.min.x, bounds.max.x),
            clamp_axis(self.min.y, size.y, bounds.min.y, bounds.max.y),
        );
        Rect { min, max: min + size }
    }
}

/// Axis-aligned extent of a `size` body rotated by `angle_deg`
pub fn rotated_extent(size: Vec2, angle_deg: f32) -> Vec2 {
    let theta = angle_deg.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}
