//! Simulation configuration.

use blockphys_core::constants::GRAVITY;
use blockphys_core::{validate_vec3, Aabb, DeltaTime, Error, NonNegative, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Tunables for the tick pipeline.
///
/// Decoding through serde validates every scalar field; hand-built configs
/// should go through [`PhysicsConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Constant acceleration applied to every movable body.
    pub gravity: Vec3,
    /// Length of one tick.
    pub fixed_timestep: DeltaTime,
    /// Horizontal speed cap on solid ground, scaled by the terrain multiplier.
    pub max_horizontal_speed: NonNegative,
    /// Half-extents of the body box, centered horizontally on the position
    /// with its bottom face at the position's `y`.
    pub body_half_extents: Vec3,
    /// Height of the head sample above the position.
    pub eye_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -GRAVITY, 0.0),
            fixed_timestep: DeltaTime::TICK,
            max_horizontal_speed: NonNegative::new(4.317).unwrap_or(NonNegative::ZERO),
            body_half_extents: Vec3::new(0.3, 0.9, 0.3),
            eye_height: 1.62,
        }
    }
}

impl PhysicsConfig {
    /// Check the fields the type system cannot.
    pub fn validate(&self) -> Result<()> {
        validate_vec3("gravity", self.gravity)?;
        self.body_box()?;
        if !self.eye_height.is_finite() || self.eye_height < 0.0 {
            return Err(Error::Validation(format!(
                "eye_height must be finite and >= 0, got {}",
                self.eye_height
            )));
        }
        Ok(())
    }

    /// Local-space body box, bottom face at the origin.
    pub fn body_box(&self) -> Result<Aabb> {
        let half = validate_vec3("body_half_extents", self.body_half_extents)?;
        Aabb::new(
            Vec3::new(-half.x, 0.0, -half.z),
            Vec3::new(half.x, 2.0 * half.y, half.z),
        )
    }
}
