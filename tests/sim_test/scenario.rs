use glam::{Quat, Vec3A};
use rbdsim::{Mesh, PhysState, World, WorldConfig};

use crate::sim_test::BodySetup;

/// A world set up from scratch and stepped with a fixed time step
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub config: WorldConfig,
    pub body_setups: Vec<BodySetup>,
    pub dt: f32,
    pub duration_ticks: usize,
    /// Index of the body whose state is recorded
    pub tracked: usize,
}

#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub ticks: Vec<PhysState>,
    pub impulses: Vec<usize>,
    /// Lowest world-space vertex height of the tracked body over the whole run
    pub lowest_vertex_z: f32,
}

impl ScenarioResult {
    pub fn last(&self) -> &PhysState {
        self.ticks.last().unwrap()
    }

    pub fn total_impulses(&self) -> usize {
        self.impulses.iter().sum()
    }

    pub fn min_z_after(&self, tick: usize) -> f32 {
        self.ticks[tick..]
            .iter()
            .map(|state| state.pos.z)
            .fold(f32::INFINITY, f32::min)
    }
}

impl Scenario {
    /// Unit cube dropped from z=2 onto a static unit cube at the origin
    pub fn cube_on_cube() -> Self {
        Self {
            name: "cube_on_cube",
            config: WorldConfig {
                gravity: Vec3A::new(0.0, 0.0, -2.0),
                ..WorldConfig::DEFAULT
            },
            body_setups: vec![
                BodySetup::unit_cube(true, Vec3A::new(0.0, 0.0, 2.0)),
                BodySetup::unit_cube(false, Vec3A::ZERO),
            ],
            dt: 0.01,
            duration_ticks: 400,
            tracked: 0,
        }
    }

    /// Unit cube dropped flat from z=1 onto a wide static quad
    pub fn cube_on_ground() -> Self {
        Self {
            name: "cube_on_ground",
            config: WorldConfig {
                gravity: Vec3A::new(0.0, 0.0, -2.0),
                ..WorldConfig::DEFAULT
            },
            body_setups: vec![
                BodySetup::unit_cube(true, Vec3A::new(0.0, 0.0, 1.0)),
                BodySetup::new(Mesh::quad(50.0, 50.0), false, Vec3A::ZERO),
            ],
            dt: 0.01,
            duration_ticks: 300,
            tracked: 0,
        }
    }

    /// Unit cube tilted around a horizontal axis, dropped onto a wide static quad
    pub fn tilted_cube_on_ground() -> Self {
        let tilt = Quat::from_axis_angle(glam::Vec3::new(0.6, 0.8, 0.0), 0.3);

        Self {
            name: "tilted_cube_on_ground",
            config: WorldConfig {
                gravity: Vec3A::new(0.0, 0.0, -2.0),
                ..WorldConfig::DEFAULT
            },
            body_setups: vec![
                BodySetup::unit_cube(true, Vec3A::new(0.0, 0.0, 2.0)).with_orientation(tilt),
                BodySetup::new(Mesh::quad(10.0, 10.0), false, Vec3A::ZERO),
            ],
            dt: 0.01,
            duration_ticks: 1500,
            tracked: 0,
        }
    }

    pub fn make_world(&self) -> World {
        let mut world = World::new(self.config);
        for setup in &self.body_setups {
            world.add_body(setup.clone().build());
        }
        world
    }

    pub fn run(&self) -> ScenarioResult {
        let mut world = self.make_world();

        let mut ticks = Vec::with_capacity(self.duration_ticks);
        let mut impulses = Vec::with_capacity(self.duration_ticks);
        let mut lowest_vertex_z = f32::INFINITY;

        for _ in 0..self.duration_ticks {
            let stats = world.step(self.dt);
            let body = &world.bodies()[self.tracked];

            let state = *body.state();
            assert!(
                (state.orientation.length() - 1.0).abs() < 1e-5,
                "{}: orientation lost its unit length",
                self.name
            );

            lowest_vertex_z = body
                .world_vertices()
                .map(|vertex| vertex.pos.z)
                .fold(lowest_vertex_z, f32::min);

            ticks.push(state);
            impulses.push(stats.impulses);
        }

        ScenarioResult {
            ticks,
            impulses,
            lowest_vertex_z,
        }
    }
}
