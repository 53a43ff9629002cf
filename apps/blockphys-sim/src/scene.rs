//! Demo scene: platform, pool and spawn grid.

use anyhow::Result;
use blockphys_core::BlockId;
use blockphys_physics::{BlockGrid, BodyOptions, RigidBody};
use glam::{IVec3, Vec3};

use crate::args::SimArgs;

/// Bodies per row of the spawn grid.
fn columns(count: usize) -> usize {
    let mut cols = 1;
    while cols * cols < count {
        cols += 1;
    }
    cols
}

/// Half-width of the platform needed for `count` bodies.
pub fn platform_half_extent(count: usize) -> i32 {
    let cols = i32::try_from(columns(count)).unwrap_or(i32::MAX / 4);
    (cols * 2).max(16)
}

/// Stone platform at `y = -1` with a two-deep pool in one corner and an ice
/// strip across the middle.
pub fn build_grid(count: usize) -> BlockGrid {
    let half = platform_half_extent(count);
    let mut grid = BlockGrid::new();
    grid.fill(IVec3::new(-half, -1, -half), IVec3::new(half, -1, half), BlockId::STONE);
    grid.fill(IVec3::new(-8, 0, -8), IVec3::new(-4, 1, -4), BlockId::WATER);
    grid.fill(IVec3::new(2, -1, -2), IVec3::new(6, -1, 2), BlockId::ICE);
    grid
}

/// Bodies on a square grid two blocks apart, staggered in height.
pub fn spawn_bodies(args: &SimArgs) -> Result<Vec<RigidBody>> {
    let cols = columns(args.bodies);
    (0..args.bodies)
        .map(|i| {
            let (col, row) = (i % cols, i / cols);
            let position = Vec3::new(
                -7.5 + 2.0 * col as f32,
                4.0 + 1.5 * (i % 3) as f32,
                -7.5 + 2.0 * row as f32,
            );
            let options = BodyOptions::dynamic(args.material, args.mass.get(), position);
            Ok(RigidBody::create(options)?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockphys_physics::BlockPort;

    #[test]
    fn spawn_grid_is_square() {
        assert_eq!(columns(0), 1);
        assert_eq!(columns(16), 4);
        assert_eq!(columns(17), 5);
    }

    #[test]
    fn bodies_start_above_the_platform() {
        let args = SimArgs {
            bodies: 64,
            ..SimArgs::default()
        };
        let grid = build_grid(args.bodies);
        let half = platform_half_extent(args.bodies) as f32;
        for body in spawn_bodies(&args).unwrap() {
            let p = body.position();
            assert!(p.x.abs() < half && p.z.abs() < half);
            assert_eq!(grid.block_at(p.floor().as_ivec3()), None);
        }
    }

    #[test]
    fn pool_and_ice_are_placed() {
        let grid = build_grid(0);
        assert_eq!(grid.block_at(IVec3::new(-6, 0, -6)), Some(BlockId::WATER));
        assert_eq!(grid.block_at(IVec3::new(4, -1, 0)), Some(BlockId::ICE));
        assert_eq!(grid.block_at(IVec3::new(0, -1, 0)), Some(BlockId::STONE));
    }
}
