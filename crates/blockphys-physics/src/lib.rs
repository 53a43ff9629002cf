//! Rigid-body motion, fluid, friction and block collision for blockphys.
//!
//! Every operation is a pure transformation over value types: bodies,
//! collision results, fluid states and terrain analyses are produced fresh
//! each tick. [`pipeline::Simulation`] ties them together into a fixed-step
//! integrator over many independent bodies.

pub mod body;
pub mod collision;
pub mod config;
pub mod fluid;
pub mod friction;
pub mod grid;
pub mod pipeline;
pub mod terrain;
pub mod world;

pub use body::{BodyId, BodyOptions, BodyType, EntityId, Motion, RigidBody, WorldId};
pub use collision::{detect, translate, CollidedAxes, CollisionResult, DetectInput, GeometryPort};
pub use config::PhysicsConfig;
pub use fluid::{FluidKind, FluidSample, FluidState};
pub use friction::{clamp_horizontal, FrictionCoefficient};
pub use grid::{BlockGrid, BlockPort};
pub use pipeline::{BodyIntent, Environment, Simulation, TickReport};
pub use terrain::{analyze, Surface, TerrainAnalysis, TerrainSample};
pub use world::PhysicsWorld;
