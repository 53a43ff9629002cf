//! Error types for the physics core.

use glam::Vec3;
use thiserror::Error;

/// Physics-wide error type.
///
/// Every variant describes a single rejected input. Nothing here is
/// transient: retrying the same call with the same arguments fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Mass was zero, negative or not finite
    #[error("Invalid mass: {0} (must be finite and > 0)")]
    InvalidMass(f32),

    /// Unknown material name
    #[error("Invalid material: {0:?}")]
    InvalidMaterial(String),

    /// Time step was zero, negative or not finite
    #[error("Invalid delta time: {0} (must be finite and > 0)")]
    InvalidDeltaTime(f32),

    /// Vector with a NaN or infinite component
    #[error("Invalid vector `{name}`: {value} has a non-finite component")]
    InvalidVector { name: &'static str, value: Vec3 },

    /// Fractional coefficient outside [0, 1]
    #[error("Invalid fraction `{name}`: {value} (must be within [0, 1])")]
    InvalidFraction { name: &'static str, value: f32 },

    /// Box whose min corner exceeds its max corner on some axis
    #[error("Invalid AABB: min {min} exceeds max {max}")]
    InvalidAabb { min: Vec3, max: Vec3 },

    /// Force applied to a static body
    #[error("Body {0} is static and cannot be moved by forces")]
    ImmovableBody(u64),

    /// Generic decode/validation failure
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
