//! Movement capabilities derived from the blocks around a body.

use blockphys_core::BlockId;
use serde::{Deserialize, Serialize};

use crate::fluid::FluidState;

/// Movement multiplier while wading or swimming.
pub const LIQUID_MOVEMENT_MULTIPLIER: f32 = 0.4;
/// Movement multiplier while airborne.
pub const AIR_MOVEMENT_MULTIPLIER: f32 = 0.6;

/// What a body is standing in or on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Solid,
    Liquid,
    Air,
}

/// Blocks sampled at a body's feet, body and below, plus its fluid state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TerrainSample {
    pub feet_block: Option<BlockId>,
    pub body_block: Option<BlockId>,
    pub below_block: Option<BlockId>,
    pub fluid: FluidState,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainAnalysis {
    pub surface: Surface,
    pub movement_multiplier: f32,
    pub can_jump: bool,
    pub can_step: bool,
    pub breathing_difficulty: f32,
}

impl TerrainAnalysis {
    const SOLID: Self = Self {
        surface: Surface::Solid,
        movement_multiplier: 1.0,
        can_jump: true,
        can_step: true,
        breathing_difficulty: 0.0,
    };

    const LIQUID: Self = Self {
        surface: Surface::Liquid,
        movement_multiplier: LIQUID_MOVEMENT_MULTIPLIER,
        can_jump: true,
        can_step: true,
        breathing_difficulty: 1.0,
    };

    const AIR: Self = Self {
        surface: Surface::Air,
        movement_multiplier: AIR_MOVEMENT_MULTIPLIER,
        can_jump: false,
        can_step: false,
        breathing_difficulty: 0.0,
    };
}

fn occupied(block: Option<BlockId>) -> bool {
    block.is_some_and(BlockId::is_solid)
}

/// Classify the surface under a body.
///
/// Fluid at the feet takes precedence over any solid block below it. A body
/// immersed only at the head is classified by its feet and the block below.
pub fn analyze(sample: &TerrainSample) -> TerrainAnalysis {
    let feet_in_fluid = sample.feet_block.is_some_and(BlockId::is_fluid);
    let analysis = if feet_in_fluid && sample.fluid.is_in_fluid() {
        TerrainAnalysis::LIQUID
    } else if occupied(sample.feet_block) || occupied(sample.below_block) {
        TerrainAnalysis::SOLID
    } else {
        TerrainAnalysis::AIR
    };
    tracing::trace!(
        surface = ?analysis.surface,
        body_block = ?sample.body_block,
        "terrain analyzed"
    );
    analysis
}
