//! Per-tick orchestration across bodies.
//!
//! For each movable body a tick runs: fluid sampling, gravity and fluid
//! resistance, collision detection, ground settling, terrain analysis,
//! friction and speed clamping, then commit. Bodies never read each other's
//! state within a tick, so they are advanced in parallel.

use blockphys_core::{validate_vec3, Aabb, DeltaTime, NonNegative, Result};
use glam::{IVec3, Vec3};
use rayon::prelude::*;

use crate::body::{BodyId, RigidBody};
use crate::collision::{detect, CollisionResult, DetectInput, GeometryPort};
use crate::config::PhysicsConfig;
use crate::fluid::{FluidSample, FluidState};
use crate::friction::{clamp_horizontal, FrictionCoefficient};
use crate::grid::BlockPort;
use crate::terrain::{analyze, Surface, TerrainAnalysis, TerrainSample};
use crate::world::PhysicsWorld;

/// Everything a tick needs from the world: static geometry and block lookups.
pub trait Environment: GeometryPort + BlockPort + Sync {}

impl<T> Environment for T where T: GeometryPort + BlockPort + Sync + ?Sized {}

/// Desired horizontal velocity, supplied by movement logic.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyIntent {
    pub movement: Vec3,
}

/// What happened to one body during a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub id: BodyId,
    /// `None` for static bodies, which are not simulated
    pub collision: Option<CollisionResult>,
    /// Fluid at the body's position after the tick
    pub fluid: FluidState,
    pub terrain: Option<TerrainAnalysis>,
}

/// Block coordinates sampled around a body position.
struct Probe {
    head: IVec3,
    body: IVec3,
    feet: IVec3,
    below: IVec3,
}

impl Probe {
    fn at(position: Vec3, eye_height: f32) -> Self {
        let feet = position.floor().as_ivec3();
        Self {
            head: (position + Vec3::Y * eye_height).floor().as_ivec3(),
            body: feet + IVec3::Y,
            feet,
            below: feet - IVec3::Y,
        }
    }
}

/// Fixed-step simulation driver.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: PhysicsConfig,
    body_box: Aabb,
}

impl Simulation {
    pub fn new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        let body_box = config.body_box()?;
        Ok(Self { config, body_box })
    }

    pub const fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Local-space box used for every body.
    pub const fn body_box(&self) -> Aabb {
        self.body_box
    }

    fn fluid_at<E>(&self, env: &E, probe: &Probe) -> Result<FluidState>
    where
        E: Environment + ?Sized,
    {
        FluidState::calculate(FluidSample {
            head_block: env.block_at(probe.head),
            feet_block: env.block_at(probe.feet),
            head_level: env.fluid_level(probe.head),
            feet_level: env.fluid_level(probe.feet),
        })
    }

    /// Advance a single body by one tick.
    pub fn advance_body<E>(
        &self,
        body: &RigidBody,
        intent: BodyIntent,
        env: &E,
        dt: DeltaTime,
    ) -> Result<(RigidBody, TickReport)>
    where
        E: Environment + ?Sized,
    {
        let probe = Probe::at(body.position(), self.config.eye_height);
        let fluid = self.fluid_at(env, &probe)?;

        if !body.is_movable() {
            let report = TickReport {
                id: body.id(),
                collision: None,
                fluid,
                terrain: None,
            };
            return Ok((body.clone(), report));
        }

        let movement = validate_vec3("intent", intent.movement)?;
        let mut velocity = body
            .apply_acceleration(self.config.gravity, dt)?
            .velocity();
        if fluid.is_in_fluid() {
            velocity = fluid.apply_resistance(velocity);
        }

        let collision = detect(
            &DetectInput {
                position: body.position(),
                velocity,
                delta_time: dt,
                body: self.body_box,
            },
            env,
        )?;

        let mut next = body.update_motion(collision.position, collision.velocity)?;
        if collision.is_grounded {
            next = next.touch_ground();
        }

        let probe = Probe::at(next.position(), self.config.eye_height);
        let fluid = self.fluid_at(env, &probe)?;
        let below_block = env.block_at(probe.below);
        let terrain = analyze(&TerrainSample {
            feet_block: env.block_at(probe.feet),
            body_block: env.block_at(probe.body),
            below_block,
            fluid,
        });

        let mut velocity = next.velocity();
        if terrain.surface == Surface::Solid {
            let traction = FrictionCoefficient::from_block(below_block).mix(next.friction().get())?;
            velocity = traction.apply(velocity, movement);
        }
        let max_speed =
            NonNegative::new(self.config.max_horizontal_speed.get() * terrain.movement_multiplier)?;
        velocity = clamp_horizontal(velocity, max_speed);
        let next = next.update_motion(next.position(), velocity)?;

        let report = TickReport {
            id: next.id(),
            collision: Some(collision),
            fluid,
            terrain: Some(terrain),
        };
        Ok((next, report))
    }

    /// Advance every body by one tick with no movement intent.
    pub fn step<E>(
        &self,
        world: PhysicsWorld,
        bodies: &mut [RigidBody],
        env: &E,
        dt: DeltaTime,
    ) -> (PhysicsWorld, Vec<Result<TickReport>>)
    where
        E: Environment + ?Sized,
    {
        self.step_with_intents(world, bodies, &[], env, dt)
    }

    /// Advance every body by one tick.
    ///
    /// `intents[i]` drives `bodies[i]`; missing entries mean no intent. The
    /// returned results line up with `bodies`. A body whose tick fails keeps
    /// its previous state, gets its error in place of a report, and is not
    /// counted as active.
    #[tracing::instrument(level = "trace", skip_all, fields(tick = world.tick(), bodies = bodies.len()))]
    pub fn step_with_intents<E>(
        &self,
        world: PhysicsWorld,
        bodies: &mut [RigidBody],
        intents: &[BodyIntent],
        env: &E,
        dt: DeltaTime,
    ) -> (PhysicsWorld, Vec<Result<TickReport>>)
    where
        E: Environment + ?Sized,
    {
        let results: Vec<Result<(RigidBody, TickReport)>> = bodies
            .par_iter()
            .enumerate()
            .map(|(i, body)| {
                let intent = intents.get(i).copied().unwrap_or_default();
                self.advance_body(body, intent, env, dt)
            })
            .collect();

        let mut active = 0;
        let reports: Vec<Result<TickReport>> = bodies
            .iter_mut()
            .zip(results)
            .map(|(body, result)| match result {
                Ok((next, report)) => {
                    *body = next;
                    if body.is_movable() {
                        active += 1;
                    }
                    Ok(report)
                }
                Err(error) => {
                    tracing::warn!(id = %body.id(), %error, "body tick failed, keeping previous state");
                    Err(error)
                }
            })
            .collect();

        let world = world.step(dt, active);
        tracing::trace!(
            tick = world.tick(),
            total_time = world.total_time(),
            active,
            "world stepped"
        );
        (world, reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyOptions, BodyType};
    use crate::fluid::FluidKind;
    use crate::grid::BlockGrid;
    use blockphys_core::{BlockId, Error, Material};

    fn floor_grid() -> BlockGrid {
        let mut grid = BlockGrid::new();
        grid.fill(IVec3::new(-8, -1, -8), IVec3::new(8, -1, 8), BlockId::STONE);
        grid
    }

    fn body_at(position: Vec3) -> RigidBody {
        RigidBody::create(BodyOptions::dynamic(Material::Wood, 60.0, position)).unwrap()
    }

    fn sim() -> Simulation {
        Simulation::new(PhysicsConfig::default()).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = PhysicsConfig {
            eye_height: f32::NAN,
            ..PhysicsConfig::default()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn free_fall_gains_speed() {
        let sim = sim();
        let grid = BlockGrid::new();
        let body = body_at(Vec3::new(0.5, 20.0, 0.5));
        let (next, report) = sim
            .advance_body(&body, BodyIntent::default(), &grid, DeltaTime::TICK)
            .unwrap();
        assert!(next.velocity().y < 0.0);
        assert!(next.position().y < 20.0);
        let terrain = report.terrain.unwrap();
        assert_eq!(terrain.surface, Surface::Air);
        assert!(!report.collision.unwrap().collided());
    }

    #[test]
    fn body_lands_and_stays_on_floor() {
        let sim = sim();
        let grid = floor_grid();
        let mut bodies = vec![body_at(Vec3::new(0.5, 3.0, 0.5))];
        let mut world = PhysicsWorld::new();
        let mut grounded = false;
        for _ in 0..100 {
            let (next_world, reports) = sim.step(world, &mut bodies, &grid, DeltaTime::TICK);
            world = next_world;
            grounded |= reports[0].as_ref().unwrap().collision.unwrap().is_grounded;
        }
        assert!(grounded);
        let body = &bodies[0];
        assert!(body.position().y >= 0.0);
        assert!(body.position().y < 0.5);
        assert_eq!(body.velocity(), Vec3::ZERO);
        assert_eq!(world.tick(), 100);
        assert_eq!(world.active_bodies(), 1);
    }

    #[test]
    fn static_bodies_are_not_simulated() {
        let sim = sim();
        let grid = BlockGrid::new();
        let anchor = RigidBody::create(
            BodyOptions::dynamic(Material::Stone, 0.0, Vec3::new(0.0, 5.0, 0.0))
                .with_body_type(BodyType::Static),
        )
        .unwrap();
        let mut bodies = vec![anchor.clone(), body_at(Vec3::new(3.0, 5.0, 0.0))];
        let (world, reports) = sim.step(PhysicsWorld::new(), &mut bodies, &grid, DeltaTime::TICK);
        assert_eq!(bodies[0], anchor);
        assert!(reports[0].as_ref().unwrap().collision.is_none());
        assert_eq!(world.active_bodies(), 1);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].as_ref().unwrap().id, bodies[1].id());
    }

    #[test]
    fn water_slows_a_sinking_body() {
        let sim = sim();
        let mut grid = BlockGrid::new();
        grid.fill(IVec3::new(-2, 0, -2), IVec3::new(2, 10, 2), BlockId::WATER);
        let mut dry = body_at(Vec3::new(20.5, 8.0, 0.5));
        let mut wet = body_at(Vec3::new(0.5, 8.0, 0.5));
        for _ in 0..10 {
            dry = sim
                .advance_body(&dry, BodyIntent::default(), &grid, DeltaTime::TICK)
                .unwrap()
                .0;
            let (next, report) = sim
                .advance_body(&wet, BodyIntent::default(), &grid, DeltaTime::TICK)
                .unwrap();
            assert_eq!(report.fluid.kind, FluidKind::Water);
            assert_eq!(report.terrain.unwrap().surface, Surface::Liquid);
            wet = next;
        }
        assert!(wet.velocity().y.abs() < dry.velocity().y.abs());
    }

    #[test]
    fn intent_is_clamped_in_water() {
        let sim = sim();
        let mut grid = BlockGrid::new();
        grid.fill(IVec3::new(-2, 0, -2), IVec3::new(2, 3, 2), BlockId::WATER);
        let body = body_at(Vec3::new(0.5, 1.0, 0.5))
            .update_motion(Vec3::new(0.5, 1.0, 0.5), Vec3::new(10.0, 0.0, 0.0))
            .unwrap();
        let (next, _) = sim
            .advance_body(&body, BodyIntent::default(), &grid, DeltaTime::TICK)
            .unwrap();
        let cap = sim.config().max_horizontal_speed.get() * crate::terrain::LIQUID_MOVEMENT_MULTIPLIER;
        assert!(next.velocity().x <= cap + 1e-4);
    }

    #[test]
    fn failed_tick_keeps_previous_state() {
        let mut grid = BlockGrid::new();
        grid.set(IVec3::new(0, -1, 0), BlockId::STONE);
        // Finite gravity whose weight force overflows to infinity.
        let config = PhysicsConfig {
            gravity: Vec3::new(0.0, f32::MAX, 0.0),
            ..PhysicsConfig::default()
        };
        let overflow = Simulation::new(config).unwrap();
        let body = body_at(Vec3::new(0.5, 0.0, 0.5));
        let mut bodies = vec![body.clone()];
        let (world, reports) = overflow.step(PhysicsWorld::new(), &mut bodies, &grid, DeltaTime::TICK);
        assert_eq!(reports.len(), 1);
        assert!(matches!(reports[0], Err(Error::InvalidVector { .. })));
        assert_eq!(bodies[0], body);
        assert_eq!(world.tick(), 1);
        assert_eq!(world.active_bodies(), 0);
    }

    #[test]
    fn failed_body_keeps_its_slot() {
        let sim = sim();
        let grid = floor_grid();
        let mut bodies = vec![
            body_at(Vec3::new(-3.5, 0.0, 0.5)),
            body_at(Vec3::new(0.5, 0.0, 0.5)),
            body_at(Vec3::new(3.5, 0.0, 0.5)),
        ];
        let stuck = bodies[1].clone();
        let intents = [
            BodyIntent::default(),
            BodyIntent {
                movement: Vec3::new(f32::NAN, 0.0, 0.0),
            },
            BodyIntent::default(),
        ];
        let (world, reports) =
            sim.step_with_intents(PhysicsWorld::new(), &mut bodies, &intents, &grid, DeltaTime::TICK);

        assert_eq!(reports.len(), bodies.len());
        assert_eq!(reports[0].as_ref().unwrap().id, bodies[0].id());
        assert!(matches!(reports[1], Err(Error::InvalidVector { name: "intent", .. })));
        assert_eq!(reports[2].as_ref().unwrap().id, bodies[2].id());
        assert_eq!(bodies[1], stuck);
        assert_eq!(world.active_bodies(), 2);
    }

    #[test]
    fn fluid_is_sampled_where_the_body_ends_up() {
        let sim = sim();
        let mut grid = BlockGrid::new();
        grid.fill(IVec3::new(-2, 0, -2), IVec3::new(2, 0, 2), BlockId::WATER);
        let body = body_at(Vec3::new(0.5, 1.2, 0.5))
            .update_motion(Vec3::new(0.5, 1.2, 0.5), Vec3::new(0.0, -10.0, 0.0))
            .unwrap();
        let (next, report) = sim
            .advance_body(&body, BodyIntent::default(), &grid, DeltaTime::TICK)
            .unwrap();
        assert!(next.position().y < 1.0);
        assert_eq!(report.fluid.kind, FluidKind::Water);
        assert_eq!(report.terrain.unwrap().surface, Surface::Liquid);
    }
}
