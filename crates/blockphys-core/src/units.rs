//! Validated scalar wrappers.
//!
//! Each wrapper can only be produced through its fallible `new`, so holding
//! one is proof the value passed its range check. Serde decoding goes through
//! the same constructor.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

macro_rules! validated_scalar {
    (
        $(#[$meta:meta])*
        $name:ident, |$v:ident| $valid:expr, $err:expr
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
        #[serde(try_from = "f32", into = "f32")]
        pub struct $name(f32);

        impl $name {
            /// Validate and wrap a raw value.
            #[inline]
            pub fn new($v: f32) -> Result<Self> {
                if $v.is_finite() && $valid {
                    Ok(Self($v))
                } else {
                    Err($err)
                }
            }

            /// The wrapped value.
            #[inline]
            pub const fn get(self) -> f32 {
                self.0
            }
        }

        impl TryFrom<f32> for $name {
            type Error = Error;

            fn try_from(value: f32) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for f32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

validated_scalar!(
    /// Body mass in kilograms, finite and strictly positive.
    Mass,
    |v| v > 0.0,
    Error::InvalidMass(v)
);

validated_scalar!(
    /// Simulation time step in seconds, finite and strictly positive.
    DeltaTime,
    |v| v > 0.0,
    Error::InvalidDeltaTime(v)
);

validated_scalar!(
    /// Coefficient in `[0, 1]` (friction, restitution, resistance, immersion).
    Fraction,
    |v| (0.0..=1.0).contains(&v),
    Error::InvalidFraction {
        name: "fraction",
        value: v
    }
);

validated_scalar!(
    /// Finite value `>= 0` (speeds, multipliers, distances).
    NonNegative,
    |v| v >= 0.0,
    Error::Validation(format!("expected a finite value >= 0, got {v}"))
);

impl Fraction {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    /// Validate a named coefficient, reporting `name` on failure.
    pub fn named(name: &'static str, value: f32) -> Result<Self> {
        Self::new(value).map_err(|_| Error::InvalidFraction { name, value })
    }

    /// Clamp a finite value into `[0, 1]`.
    ///
    /// NaN and infinities are still rejected.
    pub fn clamped(name: &'static str, value: f32) -> Result<Self> {
        if value.is_finite() {
            Ok(Self(value.clamp(0.0, 1.0)))
        } else {
            Err(Error::InvalidFraction { name, value })
        }
    }
}

impl Mass {
    pub const ONE: Self = Self(1.0);
}

impl NonNegative {
    pub const ZERO: Self = Self(0.0);
}

impl DeltaTime {
    /// One tick at 20 Hz.
    pub const TICK: Self = Self(1.0 / 20.0);
}

/// Check that every component of `value` is finite.
#[inline]
pub fn validate_vec3(name: &'static str, value: Vec3) -> Result<Vec3> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidVector { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_rejects_non_positive() {
        assert!(Mass::new(5.0).is_ok());
        assert_eq!(Mass::new(0.0), Err(Error::InvalidMass(0.0)));
        assert!(matches!(Mass::new(-1.0), Err(Error::InvalidMass(_))));
        assert!(matches!(Mass::new(f32::NAN), Err(Error::InvalidMass(_))));
        assert!(matches!(
            Mass::new(f32::INFINITY),
            Err(Error::InvalidMass(_))
        ));
    }

    #[test]
    fn delta_time_rejects_zero() {
        assert_eq!(DeltaTime::new(0.0), Err(Error::InvalidDeltaTime(0.0)));
        assert!((DeltaTime::new(0.05).unwrap().get() - 0.05).abs() < f32::EPSILON);
    }

    #[test]
    fn fraction_bounds_are_inclusive() {
        assert!(Fraction::new(0.0).is_ok());
        assert!(Fraction::new(1.0).is_ok());
        assert!(Fraction::new(1.0001).is_err());
        assert!(Fraction::new(-0.0001).is_err());
    }

    #[test]
    fn named_fraction_reports_name() {
        let err = Fraction::named("restitution", 2.0).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidFraction {
                name: "restitution",
                value: 2.0
            }
        );
    }

    #[test]
    fn clamped_fraction_refuses_nan() {
        assert_eq!(Fraction::clamped("f", 3.0).unwrap(), Fraction::ONE);
        assert_eq!(Fraction::clamped("f", -3.0).unwrap(), Fraction::ZERO);
        assert!(Fraction::clamped("f", f32::NAN).is_err());
    }

    #[test]
    fn decode_runs_validation() {
        let bytes = bincode::serialize(&-2.0f32).unwrap();
        assert!(bincode::deserialize::<Mass>(&bytes).is_err());

        let bytes = bincode::serialize(&0.25f32).unwrap();
        let fraction: Fraction = bincode::deserialize(&bytes).unwrap();
        assert!((fraction.get() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn vec3_validation() {
        assert!(validate_vec3("v", Vec3::ONE).is_ok());
        assert!(validate_vec3("v", Vec3::new(0.0, f32::NAN, 0.0)).is_err());
    }
}
