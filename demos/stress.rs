use std::time::Instant;

use glam::Vec3A;
use rbdsim::{Body, BodyConstructionInfo, Integrator, Mesh, World, WorldConfig, consts};

const NUM_CUBES: usize = 50;
const TICKS: usize = 2_000;

fn main() {
    let start = Instant::now();
    let mut world = World::new(WorldConfig {
        integrator: Integrator::Rk4,
        rng_seed: Some(4),
        ..WorldConfig::DEFAULT
    });

    for _ in 0..NUM_CUBES {
        let mesh = Mesh::cuboid(Vec3A::splat(0.5));
        world.add_body(Body::new(BodyConstructionInfo::new(mesh, true).with_mass(1.0)));
    }
    world.add_body(Body::new(BodyConstructionInfo::new(Mesh::quad(50.0, 50.0), false)));
    world.scatter_dynamic_bodies(Vec3A::new(-10.0, -10.0, 1.0), Vec3A::new(10.0, 10.0, 20.0), 3.0);
    println!(
        "Finished initializing World in {:.4}s!",
        Instant::now().duration_since(start).as_secs_f32()
    );

    let start = Instant::now();
    let mut impulses = 0;
    for _ in 0..TICKS {
        impulses += world.step(consts::DEFAULT_TIME_STEP).impulses;
    }
    let elapsed = Instant::now().duration_since(start).as_secs_f32();
    println!(
        "Elapsed: {elapsed}\nTPS: {}\nImpulses: {impulses}",
        TICKS as f32 / elapsed
    );
}
