use blockphys_core::{BlockId, DeltaTime, Material};
use blockphys_physics::{BlockGrid, BodyOptions, PhysicsConfig, PhysicsWorld, RigidBody, Simulation};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{IVec3, Vec3};

fn scene(count: usize) -> (BlockGrid, Vec<RigidBody>) {
    let mut grid = BlockGrid::new();
    grid.fill(IVec3::new(-64, -1, -64), IVec3::new(64, -1, 64), BlockId::STONE);
    grid.fill(IVec3::new(0, 0, 0), IVec3::new(16, 3, 16), BlockId::WATER);

    let bodies = (0..count)
        .map(|i| {
            let x = (i % 64) as f32 * 2.0 - 64.0 + 0.5;
            let z = (i / 64 % 64) as f32 * 2.0 - 64.0 + 0.5;
            let options = BodyOptions::dynamic(Material::Wood, 10.0, Vec3::new(x, 8.0, z));
            RigidBody::create(options).expect("valid body")
        })
        .collect();
    (grid, bodies)
}

fn bench_step(c: &mut Criterion) {
    let sim = Simulation::new(PhysicsConfig::default()).expect("default config");
    let mut group = c.benchmark_group("simulation_step");
    for count in [64, 512, 4096] {
        let (grid, bodies) = scene(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &bodies, |b, bodies| {
            b.iter_batched(
                || bodies.clone(),
                |mut bodies| {
                    let world = sim.step(PhysicsWorld::new(), &mut bodies, &grid, DeltaTime::TICK);
                    black_box(world)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
