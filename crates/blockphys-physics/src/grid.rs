//! Sparse in-memory block grid.
//!
//! Stands in for chunk storage at the physics boundary: it answers block and
//! fluid-level lookups and hands out unit-cube colliders for solid blocks.

use blockphys_core::constants::CONTACT_EPSILON;
use blockphys_core::{Aabb, BlockId};
use glam::IVec3;
use hashbrown::HashMap;

use crate::collision::GeometryPort;

/// Read access to the blocks around a body.
pub trait BlockPort {
    /// Block at a block coordinate; `None` when nothing is stored there.
    fn block_at(&self, pos: IVec3) -> Option<BlockId>;

    /// Fill level of the fluid at `pos`, 0 when the block holds no fluid.
    fn fluid_level(&self, pos: IVec3) -> f32;
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    block: BlockId,
    level: f32,
}

/// Sparse map of non-air blocks.
#[derive(Debug, Clone, Default)]
pub struct BlockGrid {
    cells: HashMap<IVec3, Cell>,
}

impl BlockGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-air blocks stored.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Place a block. Fluids are stored full; air clears the cell.
    pub fn set(&mut self, pos: IVec3, block: BlockId) {
        let level = if block.is_fluid() { 1.0 } else { 0.0 };
        self.set_fluid(pos, block, level);
    }

    /// Place a block with an explicit fluid level (clamped into [0, 1]).
    pub fn set_fluid(&mut self, pos: IVec3, block: BlockId, level: f32) {
        if block.is_air() {
            self.cells.remove(&pos);
            return;
        }
        let level = if block.is_fluid() && level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.cells.insert(pos, Cell { block, level });
    }

    /// Fill the inclusive box `min..=max` with `block`.
    pub fn fill(&mut self, min: IVec3, max: IVec3, block: BlockId) {
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    self.set(IVec3::new(x, y, z), block);
                }
            }
        }
    }
}

impl BlockPort for BlockGrid {
    fn block_at(&self, pos: IVec3) -> Option<BlockId> {
        self.cells.get(&pos).map(|cell| cell.block)
    }

    fn fluid_level(&self, pos: IVec3) -> f32 {
        self.cells.get(&pos).map_or(0.0, |cell| cell.level)
    }
}

impl GeometryPort for BlockGrid {
    fn sample(&self, query: &Aabb) -> Vec<Aabb> {
        let (lo, hi) = query.expand(CONTACT_EPSILON).block_range();
        let mut colliders = Vec::new();
        for z in lo.z..=hi.z {
            for y in lo.y..=hi.y {
                for x in lo.x..=hi.x {
                    let pos = IVec3::new(x, y, z);
                    if self.cells.get(&pos).is_some_and(|cell| cell.block.is_solid()) {
                        colliders.push(Aabb::unit_cube(pos));
                    }
                }
            }
        }
        colliders
    }
}
