//! Fluid classification, immersion and resistance.

use blockphys_core::{BlockId, Fraction, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Kind of fluid occupying a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FluidKind {
    #[default]
    None,
    Water,
    Lava,
}

impl FluidKind {
    /// Classify a block sample. Absent samples and non-fluid blocks are `None`.
    #[inline]
    pub const fn classify(block: Option<BlockId>) -> Self {
        match block {
            Some(BlockId(8 | 9)) => Self::Water,
            Some(BlockId(10 | 11)) => Self::Lava,
            _ => Self::None,
        }
    }

    /// Velocity multiplier applied each tick while immersed.
    const fn resistance(self) -> f32 {
        match self {
            Self::None => 1.0,
            Self::Water => 0.8,
            Self::Lava => 0.5,
        }
    }

    /// Upward velocity bias applied each tick while immersed.
    const fn buoyancy(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Water => 0.02,
            Self::Lava => 0.002,
        }
    }
}

/// Head and feet block samples for one body.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FluidSample {
    pub head_block: Option<BlockId>,
    pub feet_block: Option<BlockId>,
    /// Fill level of the head block, nominally in [0, 1]
    pub head_level: f32,
    /// Fill level of the feet block, nominally in [0, 1]
    pub feet_level: f32,
}

/// Fluid a body is currently in, derived once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FluidState {
    pub kind: FluidKind,
    pub immersion: Fraction,
    pub resistance: Fraction,
    pub buoyancy: f32,
}

impl Default for FluidState {
    fn default() -> Self {
        Self::none()
    }
}

impl FluidState {
    /// Preset for a body in open air.
    pub fn none() -> Self {
        Self::preset(FluidKind::None, Fraction::ZERO)
    }

    /// Preset for a fully submerged body in water.
    pub fn water() -> Self {
        Self::preset(FluidKind::Water, Fraction::ONE)
    }

    /// Preset for a fully submerged body in lava.
    pub fn lava() -> Self {
        Self::preset(FluidKind::Lava, Fraction::ONE)
    }

    fn preset(kind: FluidKind, immersion: Fraction) -> Self {
        // Preset resistances are literals inside [0, 1].
        let resistance = Fraction::clamped("resistance", kind.resistance()).unwrap_or(Fraction::ONE);
        Self {
            kind,
            immersion,
            resistance,
            buoyancy: kind.buoyancy(),
        }
    }

    /// Derive the fluid state from head and feet samples.
    pub fn calculate(sample: FluidSample) -> Result<Self> {
        Self::blend(
            FluidKind::classify(sample.head_block),
            FluidKind::classify(sample.feet_block),
            sample.head_level,
            sample.feet_level,
        )
    }

    /// Combine two zone readings; zone `a` wins when both are fluid.
    ///
    /// Immersion is the dominant zone's level clamped into [0, 1]. A
    /// non-finite level on the dominant zone is rejected.
    pub fn blend(kind_a: FluidKind, kind_b: FluidKind, level_a: f32, level_b: f32) -> Result<Self> {
        let (kind, level) = match (kind_a, kind_b) {
            (FluidKind::None, FluidKind::None) => return Ok(Self::none()),
            (FluidKind::None, kind) => (kind, level_b),
            (kind, _) => (kind, level_a),
        };
        Ok(Self::preset(kind, Fraction::clamped("immersion", level)?))
    }

    /// Damp velocity by the fluid's resistance and add buoyancy to `y`.
    #[inline]
    pub fn apply_resistance(&self, velocity: Vec3) -> Vec3 {
        let r = self.resistance.get();
        Vec3::new(velocity.x * r, velocity.y * r + self.buoyancy, velocity.z * r)
    }

    #[inline]
    pub fn is_in_fluid(&self) -> bool {
        self.kind != FluidKind::None
    }
}
