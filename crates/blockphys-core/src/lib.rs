//! Core types, validated scalars and geometry for blockphys.
//!
//! This crate provides the foundational types used by the physics crate:
//! - Block ids and surface materials
//! - Axis-aligned boxes
//! - Range-checked scalar wrappers (mass, time step, fractions)
//! - The shared error type

pub mod error;
pub mod math;
pub mod types;
pub mod units;

pub use error::{Error, Result};
pub use math::Aabb;
pub use types::{BlockId, Material};
pub use units::{validate_vec3, DeltaTime, Fraction, Mass, NonNegative};

/// Physics-wide constants
pub mod constants {
    /// Velocity components smaller than this are zeroed on ground contact
    pub const GROUND_EPSILON: f32 = 1e-6;
    /// Slack used by the collision overlap test
    pub const CONTACT_EPSILON: f32 = 1e-4;
    /// Standard gravity in blocks per second squared
    pub const GRAVITY: f32 = 9.81;
}
