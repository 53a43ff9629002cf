//! Discrete swept-AABB collision against static geometry.
//!
//! The detector moves a body's box to its forward-Euler candidate position
//! and asks a [`GeometryPort`] for the static colliders around it. Any
//! contact cancels the whole move: the position rolls back and all velocity
//! is dropped. There is no per-axis sliding and no penetration depth.

use blockphys_core::constants::CONTACT_EPSILON;
use blockphys_core::{validate_vec3, Aabb, DeltaTime, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Source of static colliders for a region of the world.
///
/// Implementations must return every collider intersecting `query` for the
/// current tick. Missing colliders cause missed collisions, never panics.
pub trait GeometryPort {
    fn sample(&self, query: &Aabb) -> Vec<Aabb>;
}

impl<F> GeometryPort for F
where
    F: Fn(&Aabb) -> Vec<Aabb>,
{
    fn sample(&self, query: &Aabb) -> Vec<Aabb> {
        self(query)
    }
}

impl GeometryPort for [Aabb] {
    fn sample(&self, query: &Aabb) -> Vec<Aabb> {
        self.iter()
            .filter(|collider| collider.intersects_with_tolerance(query, CONTACT_EPSILON))
            .copied()
            .collect()
    }
}

/// Per-axis collision flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollidedAxes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl CollidedAxes {
    pub const NONE: Self = Self {
        x: false,
        y: false,
        z: false,
    };
    pub const ALL: Self = Self {
        x: true,
        y: true,
        z: true,
    };

    #[inline]
    pub const fn any(self) -> bool {
        self.x || self.y || self.z
    }
}

/// Input to a single detection call.
#[derive(Clone, Copy, Debug)]
pub struct DetectInput {
    pub position: Vec3,
    pub velocity: Vec3,
    pub delta_time: DeltaTime,
    /// Body box in local space, relative to `position`
    pub body: Aabb,
}

/// Resolved motion for one body for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionResult {
    pub position: Vec3,
    pub velocity: Vec3,
    pub collided_axes: CollidedAxes,
    pub is_grounded: bool,
    pub contact_normal: Vec3,
    /// Always zero; no contact manifold is computed.
    pub penetration: f32,
}

impl CollisionResult {
    #[inline]
    pub const fn collided(&self) -> bool {
        self.collided_axes.any()
    }
}

/// Shift `aabb` by `offset`.
#[inline]
pub fn translate(aabb: &Aabb, offset: Vec3) -> Result<Aabb> {
    aabb.translate(offset)
}

/// Unit normal opposing `v` on one axis. A resting axis points positive.
#[inline]
fn opposing(v: f32) -> f32 {
    if v > 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Run discrete collision detection for one body.
///
/// Non-finite input, or a candidate position that overflows, fails with
/// `InvalidVector` before the geometry port is queried.
pub fn detect<G>(input: &DetectInput, geometry: &G) -> Result<CollisionResult>
where
    G: GeometryPort + ?Sized,
{
    let DetectInput {
        position,
        velocity,
        delta_time,
        body,
    } = *input;
    let position = validate_vec3("position", position)?;
    let velocity = validate_vec3("velocity", velocity)?;

    let candidate = validate_vec3("candidate", position + velocity * delta_time.get())?;
    let candidate_box = body.translate(candidate)?;

    let hit = geometry
        .sample(&candidate_box)
        .iter()
        .any(|collider| collider.intersects_with_tolerance(&candidate_box, CONTACT_EPSILON));

    if !hit {
        return Ok(CollisionResult {
            position: candidate,
            velocity,
            collided_axes: CollidedAxes::NONE,
            is_grounded: false,
            contact_normal: Vec3::ZERO,
            penetration: 0.0,
        });
    }

    let mut axes = CollidedAxes {
        x: velocity.x != 0.0,
        y: velocity.y != 0.0,
        z: velocity.z != 0.0,
    };
    if !axes.any() {
        axes = CollidedAxes::ALL;
    }

    let contact_normal = if axes.y {
        Vec3::new(0.0, opposing(velocity.y), 0.0)
    } else if axes.x {
        Vec3::new(opposing(velocity.x), 0.0, 0.0)
    } else {
        Vec3::new(0.0, 0.0, opposing(velocity.z))
    };

    tracing::trace!(
        ?position,
        ?candidate,
        ?axes,
        ?contact_normal,
        "collision, move rolled back"
    );

    Ok(CollisionResult {
        position,
        velocity: Vec3::ZERO,
        collided_axes: axes,
        is_grounded: axes.y,
        contact_normal,
        penetration: 0.0,
    })
}
