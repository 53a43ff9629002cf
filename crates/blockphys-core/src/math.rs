//! Axis-aligned boxes.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-Aligned Bounding Box.
///
/// Corners are finite and `min <= max` on every axis. The only ways to build
/// one are [`Aabb::new`] and helpers whose inputs cannot break that.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAabb", into = "RawAabb")]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

/// Unchecked wire form of [`Aabb`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct RawAabb {
    min: Vec3,
    max: Vec3,
}

impl TryFrom<RawAabb> for Aabb {
    type Error = Error;

    fn try_from(raw: RawAabb) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl From<Aabb> for RawAabb {
    fn from(aabb: Aabb) -> Self {
        Self {
            min: aabb.min,
            max: aabb.max,
        }
    }
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Result<Self> {
        if !min.is_finite() {
            return Err(Error::InvalidVector {
                name: "aabb.min",
                value: min,
            });
        }
        if !max.is_finite() {
            return Err(Error::InvalidVector {
                name: "aabb.max",
                value: max,
            });
        }
        if min.cmpgt(max).any() {
            return Err(Error::InvalidAabb { min, max });
        }
        Ok(Self { min, max })
    }

    /// Create an AABB centered at origin with given half-extents
    pub fn from_half_extents(half_extents: Vec3) -> Result<Self> {
        Self::new(-half_extents, half_extents)
    }

    /// Create an AABB for the unit block at the given block coordinate
    #[inline]
    pub fn unit_cube(block: IVec3) -> Self {
        let min = block.as_vec3();
        Self {
            min,
            max: min + Vec3::ONE,
        }
    }

    /// Minimum corner
    #[inline]
    pub const fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner
    #[inline]
    pub const fn max(&self) -> Vec3 {
        self.max
    }

    /// Get the center of the AABB
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the AABB
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get the half-extents of the AABB
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Check if a point is inside the AABB
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Check if this AABB intersects another (touching faces count)
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersects_with_tolerance(other, 0.0)
    }

    /// Overlap test where each gap comparison is relaxed by `epsilon`.
    ///
    /// Boxes separated by less than `epsilon` on every axis still count as
    /// touching.
    #[inline]
    pub fn intersects_with_tolerance(&self, other: &Self, epsilon: f32) -> bool {
        self.min.x <= other.max.x + epsilon
            && self.max.x + epsilon >= other.min.x
            && self.min.y <= other.max.y + epsilon
            && self.max.y + epsilon >= other.min.y
            && self.min.z <= other.max.z + epsilon
            && self.max.z + epsilon >= other.min.z
    }

    /// Shift both corners by `offset`, keeping the size on every axis.
    ///
    /// Fails with [`Error::InvalidVector`] if the offset is non-finite or the
    /// shifted corners overflow.
    #[inline]
    pub fn translate(&self, offset: Vec3) -> Result<Self> {
        if !offset.is_finite() {
            return Err(Error::InvalidVector {
                name: "aabb.offset",
                value: offset,
            });
        }
        Self::new(self.min + offset, self.max + offset)
    }

    /// Grow the box by `margin` on every side
    #[inline]
    #[must_use]
    pub fn expand(&self, margin: f32) -> Self {
        let margin = Vec3::splat(margin.max(0.0));
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Merge two AABBs
    #[inline]
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Inclusive range of block coordinates the box overlaps.
    #[inline]
    pub fn block_range(&self) -> (IVec3, IVec3) {
        (self.min.floor().as_ivec3(), self.max.floor().as_ivec3())
    }
}
