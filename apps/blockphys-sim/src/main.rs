//! blockphys headless simulation
//!
//! Drops a grid of bodies onto a stone platform with a water pool and an ice
//! patch, then runs fixed ticks and logs what the bodies are doing.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p blockphys-sim -- [OPTIONS]
//! ```
//!
//! Run with `--help` for the option list.
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod args;
mod scene;

use anyhow::Result;
use blockphys_physics::{PhysicsConfig, PhysicsWorld, Simulation, Surface, TickReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{print_help, SimArgs};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct TickSummary {
    grounded: usize,
    in_fluid: usize,
    airborne: usize,
    failed: usize,
}

impl TickSummary {
    fn from_reports(reports: &[blockphys_core::Result<TickReport>]) -> Self {
        reports.iter().fold(Self::default(), |mut acc, result| {
            let Ok(report) = result else {
                acc.failed += 1;
                return acc;
            };
            if report.collision.is_some_and(|c| c.is_grounded) {
                acc.grounded += 1;
            }
            if report.fluid.is_in_fluid() {
                acc.in_fluid += 1;
            }
            if report.terrain.is_some_and(|t| t.surface == Surface::Air) {
                acc.airborne += 1;
            }
            acc
        })
    }
}

fn main() -> Result<()> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = SimArgs::parse(&raw)?;
    if args.help {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PhysicsConfig {
        fixed_timestep: args.dt,
        ..PhysicsConfig::default()
    };
    let sim = Simulation::new(config)?;
    let grid = scene::build_grid(args.bodies);
    let mut bodies = scene::spawn_bodies(&args)?;
    info!(
        bodies = bodies.len(),
        blocks = grid.len(),
        ticks = args.ticks,
        material = %args.material,
        "starting simulation"
    );

    let dt = sim.config().fixed_timestep;
    let mut world = PhysicsWorld::new();
    let mut last = TickSummary::default();
    for _ in 0..args.ticks {
        let (next, reports) = sim.step(world, &mut bodies, &grid, dt);
        world = next;
        last = TickSummary::from_reports(&reports);
        if args.report_every > 0 && world.tick() % args.report_every == 0 {
            info!(
                tick = world.tick(),
                time = format_args!("{:.2}s", world.total_time()),
                grounded = last.grounded,
                in_fluid = last.in_fluid,
                airborne = last.airborne,
                failed = last.failed,
                "tick"
            );
        }
    }

    info!(
        ticks = world.tick(),
        time = format_args!("{:.2}s", world.total_time()),
        active = world.active_bodies(),
        grounded = last.grounded,
        in_fluid = last.in_fluid,
        "simulation finished"
    );
    Ok(())
}
