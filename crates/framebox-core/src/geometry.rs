//! World-space box geometry.
//!
//! [`Box2D`] is the only geometric primitive the hit detector needs: an
//! axis-aligned rectangle with `f32` corners, produced transiently by the
//! projector and never persisted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Box2D {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Box2D {
    /// Creates a box from its corners.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a box spanning `center - half` to `center + half`.
    #[must_use]
    pub fn from_center_and_half_extents(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Extent of the box (`max - min`).
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Returns the width of the box.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Returns the height of the box.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Returns true if the box has no area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Checks if this box overlaps another.
    ///
    /// Boxes that only share an edge do not intersect, so a zero-width or
    /// zero-height box never intersects anything, itself included.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Intersection rectangle of two boxes, if they intersect.
    #[must_use]
    pub fn overlap(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }

    /// Returns the box translated by an offset.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Checks whether two boxes overlap. Same as [`Box2D::intersects`].
#[must_use]
pub fn boxes_overlap(a: &Box2D, b: &Box2D) -> bool {
    a.intersects(b)
}
