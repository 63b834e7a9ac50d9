use glam::Vec3A;
use rbdsim::{
    Body, BodyConstructionInfo, Mesh, World, WorldConfig, camera::CameraController, logging,
};

const NUM_CUBES: usize = 12;

fn main() {
    let _ = logging::try_init();

    let mut world = World::new(WorldConfig {
        rng_seed: Some(0),
        ..WorldConfig::DEFAULT
    });

    for _ in 0..NUM_CUBES {
        let mesh = Mesh::cuboid(Vec3A::splat(0.5));
        world.add_body(Body::new(BodyConstructionInfo::new(mesh, true).with_mass(1.0)));
    }
    world.add_body(Body::new(BodyConstructionInfo::new(
        Mesh::quad(20.0, 20.0),
        false,
    )));

    world.scatter_dynamic_bodies(Vec3A::new(-4.0, -4.0, 2.0), Vec3A::new(4.0, 4.0, 12.0), 2.0);

    // Headless stand-in for a render loop: fixed 60 fps frames
    let mut camera = CameraController::DEFAULT;
    camera.pos = glam::Vec3::new(0.0, 15.0, 6.0);

    let mut vertices = Vec::new();
    for frame in 0..600 {
        let Some(stats) = world.frame(1.0 / 60.0) else {
            continue;
        };

        let view_proj = camera.projection_matrix(16.0 / 9.0, 0.1, 100.0) * camera.view_matrix();
        let mut visible = 0;
        for body in world.bodies() {
            body.write_world_vertices(&mut vertices);
            visible += vertices
                .iter()
                .filter(|v| view_proj.project_point3(v.pos.into()).abs().max_element() <= 1.0)
                .count();
        }

        if frame % 60 == 0 {
            println!("frame {frame}: {stats:?}, {visible} visible vertices");
        }
    }

    for (i, body) in world.bodies().iter().enumerate().filter(|(_, body)| body.is_dynamic()) {
        println!("cube {i}: pos {}", body.state().pos);
    }
}
