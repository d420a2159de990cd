//! Axis-aligned footprints in the ground (x-z) plane.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle a road, building or tree occupies on the ground plane.
///
/// `center.x` is world X and `center.y` is world Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Footprint {
    /// Footprint from a center and full extents along x (width) and z (depth).
    pub fn from_center_size(x: f32, z: f32, width: f32, depth: f32) -> Self {
        Self {
            center: Vec2::new(x, z),
            half_extents: Vec2::new(width * 0.5, depth * 0.5),
        }
    }

    /// Zero-sized footprint at a point.
    pub fn point(x: f32, z: f32) -> Self {
        Self {
            center: Vec2::new(x, z),
            half_extents: Vec2::ZERO,
        }
    }

    /// Full width along x.
    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    /// Full depth along z.
    pub fn depth(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    /// Minimum corner (x, z).
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    /// Maximum corner (x, z).
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Footprint grown by `amount` on every side.
    pub fn inflated(&self, amount: f32) -> Self {
        Self {
            center: self.center,
            half_extents: self.half_extents + Vec2::splat(amount),
        }
    }

    /// Overlap test on both axes, with `buffer` added to the combined half extents.
    ///
    /// Strict comparison: rectangles whose edges exactly touch do not intersect.
    pub fn intersects(&self, other: &Footprint, buffer: f32) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents + Vec2::splat(buffer);
        delta.x < reach.x && delta.y < reach.y
    }

    /// Whether the point (x, z) lies strictly inside this footprint.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        self.intersects(&Footprint::point(x, z), 0.0)
    }
}
