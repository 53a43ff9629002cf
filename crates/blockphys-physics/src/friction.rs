//! Surface friction and horizontal velocity shaping.

use blockphys_core::{BlockId, Error, Fraction, Material, NonNegative, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Friction coefficient of a material.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrictionCoefficient {
    pub material: Option<Material>,
    pub coefficient: Fraction,
}

/// Static friction table.
const fn material_coefficient(material: Material) -> f32 {
    match material {
        Material::PackedIce => 0.01,
        Material::Ice => 0.02,
        Material::Slime => 0.2,
        Material::Snow => 0.3,
        Material::Glass => 0.35,
        Material::Metal => 0.4,
        Material::Wood => 0.5,
        Material::Dirt | Material::Grass => 0.6,
        Material::Gravel => 0.65,
        Material::Sand => 0.7,
        Material::Stone => 0.8,
        Material::Rubber => 0.95,
    }
}

impl FrictionCoefficient {
    /// No traction at all (air, fluids).
    pub const NONE: Self = Self {
        material: None,
        coefficient: Fraction::ZERO,
    };

    /// Look up a material's coefficient.
    pub fn from_material(material: Material) -> Self {
        Self {
            material: Some(material),
            coefficient: Fraction::clamped("friction", material_coefficient(material))
                .unwrap_or(Fraction::ZERO),
        }
    }

    /// Friction of the block a body stands on.
    ///
    /// Air, fluids and blocks without a material give no traction.
    pub fn from_block(block: Option<BlockId>) -> Self {
        block
            .and_then(BlockId::material)
            .map_or(Self::NONE, Self::from_material)
    }

    /// Blend the horizontal velocity toward `input` by the coefficient.
    ///
    /// The vertical component of `current` passes through unchanged.
    #[inline]
    pub fn apply(&self, current: Vec3, input: Vec3) -> Vec3 {
        let k = self.coefficient.get();
        Vec3::new(
            current.x + (input.x - current.x) * k,
            current.y,
            current.z + (input.z - current.z) * k,
        )
    }

    /// Scale the coefficient by `modifier`, clamped back into [0, 1].
    pub fn mix(&self, modifier: f32) -> Result<Self> {
        if !modifier.is_finite() {
            return Err(Error::Validation(format!(
                "friction modifier must be finite, got {modifier}"
            )));
        }
        Ok(Self {
            material: self.material,
            coefficient: Fraction::clamped("friction", self.coefficient.get() * modifier)?,
        })
    }
}

/// Cap the horizontal speed at `max_speed`, leaving `y` alone.
pub fn clamp_horizontal(velocity: Vec3, max_speed: NonNegative) -> Vec3 {
    let max = max_speed.get();
    let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
    let speed = horizontal.length();
    if speed <= max || speed == 0.0 {
        return velocity;
    }
    let scaled = horizontal * (max / speed);
    Vec3::new(scaled.x, velocity.y, scaled.z)
}
