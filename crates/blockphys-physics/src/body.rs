//! Rigid bodies and their motion transforms.
//!
//! A [`RigidBody`] is an immutable snapshot. [`RigidBody::apply_force`],
//! [`RigidBody::update_motion`] and [`RigidBody::touch_ground`] return a new
//! snapshot and leave the receiver untouched, so whoever owns the body
//! rebinds its id to the returned value.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use blockphys_core::constants::GROUND_EPSILON;
use blockphys_core::{validate_vec3, DeltaTime, Error, Fraction, Mass, Material, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::friction::FrictionCoefficient;

static NEXT_BODY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique body identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl BodyId {
    fn next() -> Self {
        Self(NEXT_BODY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// World the body lives in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(pub u64);

/// Entity that owns the body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    /// Never moves
    Static,
    /// Moved by forces and collisions
    Dynamic,
    /// Moved by forces but driven by game logic
    Kinematic,
}

impl BodyType {
    #[inline]
    pub const fn is_movable(self) -> bool {
        match self {
            Self::Static => false,
            Self::Dynamic | Self::Kinematic => true,
        }
    }
}

/// Position and velocity of a body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Construction options for [`RigidBody::create`].
#[derive(Clone, Debug, PartialEq)]
pub struct BodyOptions {
    pub world_id: WorldId,
    pub entity_id: EntityId,
    pub body_type: BodyType,
    pub material: Material,
    /// Required `> 0` unless the body is static
    pub mass: f32,
    pub position: Vec3,
    /// Defaults to 0
    pub restitution: Option<f32>,
    /// Defaults to the material's coefficient
    pub friction: Option<f32>,
}

impl BodyOptions {
    /// Options for a dynamic body with default coefficients.
    pub fn dynamic(material: Material, mass: f32, position: Vec3) -> Self {
        Self {
            world_id: WorldId::default(),
            entity_id: EntityId::default(),
            body_type: BodyType::Dynamic,
            material,
            mass,
            position,
            restitution: None,
            friction: None,
        }
    }

    /// Like [`BodyOptions::dynamic`], parsing the material from its name.
    pub fn dynamic_named(material: &str, mass: f32, position: Vec3) -> Result<Self> {
        Ok(Self::dynamic(material.parse()?, mass, position))
    }

    #[must_use]
    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = body_type;
        self
    }

    #[must_use]
    pub fn with_owner(mut self, world_id: WorldId, entity_id: EntityId) -> Self {
        self.world_id = world_id;
        self.entity_id = entity_id;
        self
    }

    #[must_use]
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = Some(restitution);
        self
    }

    #[must_use]
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = Some(friction);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    id: BodyId,
    world_id: WorldId,
    entity_id: EntityId,
    body_type: BodyType,
    material: Material,
    /// `None` only for static bodies
    mass: Option<Mass>,
    motion: Motion,
    restitution: Fraction,
    friction: Fraction,
}

impl RigidBody {
    /// Validate `options` and build a body at rest.
    pub fn create(options: BodyOptions) -> Result<Self> {
        let mass = if options.body_type.is_movable() {
            Some(Mass::new(options.mass)?)
        } else if options.mass.is_finite() && options.mass >= 0.0 {
            None
        } else {
            return Err(Error::InvalidMass(options.mass));
        };

        let restitution = match options.restitution {
            Some(r) => Fraction::named("restitution", r)?,
            None => Fraction::ZERO,
        };
        let friction = match options.friction {
            Some(f) => Fraction::named("friction", f)?,
            None => FrictionCoefficient::from_material(options.material).coefficient,
        };
        let position = validate_vec3("position", options.position)?;

        let body = Self {
            id: BodyId::next(),
            world_id: options.world_id,
            entity_id: options.entity_id,
            body_type: options.body_type,
            material: options.material,
            mass,
            motion: Motion {
                position,
                velocity: Vec3::ZERO,
            },
            restitution,
            friction,
        };
        tracing::debug!(
            id = %body.id,
            body_type = ?body.body_type,
            material = %body.material,
            "rigid body created"
        );
        Ok(body)
    }

    pub const fn id(&self) -> BodyId {
        self.id
    }

    pub const fn world_id(&self) -> WorldId {
        self.world_id
    }

    pub const fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub const fn body_type(&self) -> BodyType {
        self.body_type
    }

    pub const fn material(&self) -> Material {
        self.material
    }

    pub const fn mass(&self) -> Option<Mass> {
        self.mass
    }

    pub const fn motion(&self) -> Motion {
        self.motion
    }

    pub const fn position(&self) -> Vec3 {
        self.motion.position
    }

    pub const fn velocity(&self) -> Vec3 {
        self.motion.velocity
    }

    pub const fn restitution(&self) -> Fraction {
        self.restitution
    }

    pub const fn friction(&self) -> Fraction {
        self.friction
    }

    pub const fn is_movable(&self) -> bool {
        self.body_type.is_movable()
    }

    fn movable_mass(&self) -> Result<Mass> {
        self.mass.ok_or(Error::ImmovableBody(self.id.0))
    }

    /// Integrate `force` over `dt` with semi-implicit Euler.
    ///
    /// `v' = v + (F / m) dt`, then `p' = p + v' dt`.
    pub fn apply_force(&self, force: Vec3, dt: DeltaTime) -> Result<Self> {
        let mass = self.movable_mass()?;
        let force = validate_vec3("force", force)?;
        let dt = dt.get();

        let velocity = self.motion.velocity + force / mass.get() * dt;
        let position = self.motion.position + velocity * dt;
        Ok(self.with_motion(Motion { position, velocity }))
    }

    /// [`RigidBody::apply_force`] taking an unchecked time step.
    pub fn apply_force_raw(&self, force: Vec3, dt: f32) -> Result<Self> {
        self.apply_force(force, DeltaTime::new(dt)?)
    }

    /// Apply a mass-independent acceleration such as gravity.
    pub fn apply_acceleration(&self, acceleration: Vec3, dt: DeltaTime) -> Result<Self> {
        let mass = self.movable_mass()?;
        self.apply_force(acceleration * mass.get(), dt)
    }

    /// Replace position and velocity wholesale (teleports, corrections).
    pub fn update_motion(&self, position: Vec3, velocity: Vec3) -> Result<Self> {
        Ok(self.with_motion(Motion {
            position: validate_vec3("position", position)?,
            velocity: validate_vec3("velocity", velocity)?,
        }))
    }

    /// Zero every velocity component below the ground-contact epsilon.
    #[must_use]
    pub fn touch_ground(&self) -> Self {
        let v = self.motion.velocity;
        let settle = |c: f32| if c.abs() < GROUND_EPSILON { 0.0 } else { c };
        self.with_motion(Motion {
            position: self.motion.position,
            velocity: Vec3::new(settle(v.x), settle(v.y), settle(v.z)),
        })
    }

    fn with_motion(&self, motion: Motion) -> Self {
        Self {
            motion,
            ..self.clone()
        }
    }
}
