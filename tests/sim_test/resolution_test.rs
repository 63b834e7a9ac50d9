use glam::{Quat, Vec3A};
use rbdsim::{
    BodyId, Contact, ContactBuffer, ContactModel, PhysState, World, WorldConfig,
    dynamics::impulse_solver::{impulse_magnitude, resolve_body},
};

use crate::sim_test::{BodySetup, EPSILON, assert_vec_near, ground_triangle};

const CORNER: Vec3A = Vec3A::new(0.5, 0.5, -0.5);

#[test]
fn test_off_center_impulse_is_partial() {
    let mut body = BodySetup::unit_cube(true, Vec3A::ZERO)
        .with_lin_momentum(Vec3A::new(0.0, 0.0, -2.0))
        .build();
    body.push_contact(Contact::vertex(CORNER, Vec3A::Z));

    assert_eq!(resolve_body(&mut body), 1);

    // Effective inverse mass at the corner is 1 + 3, a quarter of the normal momentum cancels
    let state = body.state();
    assert_vec_near(state.lin_momentum, Vec3A::new(0.0, 0.0, -1.5), 1e-4);
    assert_vec_near(state.ang_momentum, Vec3A::new(0.25, -0.25, 0.0), 1e-4);

    // The corner itself stops moving into the face
    let corner_vel = body.linear_velocity() + body.angular_velocity().cross(CORNER);
    assert!(corner_vel.z.abs() < 1e-4, "corner velocity {corner_vel}");
}

#[test]
fn test_impulse_at_center_stops_normal_motion() {
    let mut body = BodySetup::point(Vec3A::ZERO)
        .with_lin_momentum(Vec3A::new(1.0, 0.0, -2.0))
        .build();
    body.push_contact(Contact::vertex(Vec3A::ZERO, Vec3A::Z));

    assert_eq!(resolve_body(&mut body), 1);
    assert_eq!(body.state().lin_momentum, Vec3A::new(1.0, 0.0, 0.0));
    assert_eq!(body.state().ang_momentum, Vec3A::ZERO);
}

#[test]
fn test_separating_contact_is_ignored() {
    let mut body = BodySetup::unit_cube(true, Vec3A::ZERO)
        .with_lin_momentum(Vec3A::new(0.0, 0.0, 1.0))
        .build();
    let before = *body.state();
    body.push_contact(Contact::vertex(CORNER, Vec3A::Z));

    assert_eq!(resolve_body(&mut body), 0);
    assert_eq!(*body.state(), before);
    assert!(body.contacts().is_empty());
}

#[test]
fn test_face_contact_shares_impulse_over_corners() {
    let mut body = BodySetup::point(Vec3A::ZERO)
        .with_lin_momentum(Vec3A::new(0.0, 0.0, -3.0))
        .build();
    body.push_contact(Contact::face([Vec3A::ZERO; 3], Vec3A::Z));

    // Three points at the center, a third of the full impulse each
    assert_eq!(resolve_body(&mut body), 3);
    assert_vec_near(body.state().lin_momentum, Vec3A::ZERO, EPSILON);
}

#[test]
fn test_contacts_use_the_same_snapshot() {
    // Every contact sees the momentum from before resolution,
    // not the one left by the previous contact
    let mut body = BodySetup::point(Vec3A::ZERO)
        .with_lin_momentum(Vec3A::new(0.0, 0.0, -1.0))
        .build();
    body.push_contact(Contact::vertex(Vec3A::ZERO, Vec3A::Z));
    body.push_contact(Contact::vertex(Vec3A::ZERO, Vec3A::X));
    body.push_contact(Contact::vertex(Vec3A::new(0.0, 0.0, 0.0), Vec3A::new(0.0, 0.6, 0.8)));

    assert_eq!(resolve_body(&mut body), 2);
    // Z cancels the -1, X is not approaching, the tilted normal adds 0.8 along itself
    assert_vec_near(
        body.state().lin_momentum,
        Vec3A::new(0.0, 0.48, 0.64),
        1e-5,
    );
}

#[test]
fn test_static_body_only_clears_contacts() {
    let mut body = ground_triangle();
    let before = *body.state();
    body.push_contact(Contact::face([Vec3A::X, Vec3A::Y, Vec3A::Z], Vec3A::NEG_Z));

    assert_eq!(resolve_body(&mut body), 0);
    assert_eq!(*body.state(), before);
    assert!(body.contacts().is_empty());
}

#[test]
fn test_impulse_magnitude_degenerate_denominator() {
    assert_eq!(
        impulse_magnitude(0.0, glam::Mat3A::ZERO, CORNER, Vec3A::Z, -1.0),
        0.0
    );
    assert_eq!(
        impulse_magnitude(1.0, glam::Mat3A::ZERO, CORNER, Vec3A::Z, -1.0),
        1.0
    );
}

#[test]
fn test_contact_buffer_dedups_and_keeps_capacity() {
    let mut buffer = ContactBuffer::default();

    assert!(buffer.push(Contact::vertex(Vec3A::ZERO, Vec3A::Z)));
    assert!(!buffer.push(Contact::vertex(Vec3A::ZERO, Vec3A::Z)));
    assert!(buffer.push(Contact::vertex(Vec3A::ZERO, Vec3A::X)));
    assert!(buffer.push(Contact::face([Vec3A::ZERO; 3], Vec3A::Z)));

    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.num_points(), 5);
    assert_eq!(buffer.iter().count(), (&buffer).into_iter().count());

    let capacity = buffer.capacity();
    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), capacity);
}

/// Point moving down at 2 m/s that just went through the ground triangle
fn falling_point_world(config: WorldConfig) -> World {
    let mut world = World::new(WorldConfig {
        gravity: Vec3A::ZERO,
        ..config
    });
    let point = world.add_body(
        BodySetup::point(Vec3A::ZERO)
            .with_lin_momentum(Vec3A::new(0.0, 0.0, -2.0))
            .build(),
    );
    world.add_body(ground_triangle());

    let body = world.body_mut(point).unwrap();
    let mut state = *body.state();
    state.pos.z = -0.01;
    let mut prev = state;
    prev.pos.z = 0.01;
    body.set_state(state);
    body.set_prev_state(prev);

    world
}

#[test]
fn test_resolve_consumes_contacts_and_rewinds() {
    let mut world = falling_point_world(WorldConfig::DEFAULT);

    assert_eq!(world.detect_collisions(), 1);
    assert_eq!(world.resolve_collisions(), 1);

    let point = &world.bodies()[0];
    assert!(world.bodies().iter().all(|body| body.contacts().is_empty()));
    assert_vec_near(point.state().lin_momentum, Vec3A::ZERO, EPSILON);
    // Back above the face, and that pose is the new previous state
    assert_eq!(point.state().pos.z, 0.01);
    assert_eq!(point.state(), point.prev_state());

    // Nothing left to resolve
    let before = *point.state();
    assert_eq!(world.resolve_collisions(), 0);
    assert_eq!(*world.bodies()[0].state(), before);
}

#[test]
fn test_rewind_keeps_sliding_motion() {
    let mut world = falling_point_world(WorldConfig::DEFAULT);

    // Same fall, but also moving along the face at 2 m/s
    let body = world.body_mut(BodyId(0)).unwrap();
    let prev = *body.prev_state();
    let mut state = *body.state();
    state.pos.x = 0.02;
    state.lin_momentum.x = 2.0;
    body.set_state(state);
    body.set_prev_state(prev);

    world.detect_collisions();
    assert_eq!(world.resolve_collisions(), 1);

    let point = &world.bodies()[0];
    assert_vec_near(point.state().lin_momentum, Vec3A::new(2.0, 0.0, 0.0), EPSILON);
    // Only the drop into the face is taken back
    assert_vec_near(point.state().pos, Vec3A::new(0.02, 0.0, 0.01), EPSILON);
}

#[test]
fn test_rising_through_the_ground_is_not_stopped() {
    let mut world = World::new(WorldConfig {
        gravity: Vec3A::ZERO,
        ..WorldConfig::DEFAULT
    });
    let point = world.add_body(
        BodySetup::point(Vec3A::new(0.0, 0.0, -0.1))
            .with_lin_momentum(Vec3A::Z)
            .build(),
    );
    world.add_body(ground_triangle());

    let (mut hits, mut impulses) = (0, 0);
    for _ in 0..100 {
        let stats = world.step(0.05);
        hits += stats.hits;
        impulses += stats.impulses;
    }

    // The crossing is seen once, but a separating contact gets no impulse and no rewind
    assert_eq!(hits, 1);
    assert_eq!(impulses, 0);

    let state = world.body(point).unwrap().state();
    assert_eq!(state.lin_momentum, Vec3A::Z);
    assert!((state.pos.z - 4.9).abs() < 1e-3, "stuck at {}", state.pos);
}

#[test]
fn test_rewind_along_single_normal() {
    let mut body = BodySetup::unit_cube(true, Vec3A::ZERO).build();
    let prev = *body.prev_state();

    let mut moved = prev;
    moved.pos = Vec3A::new(0.3, -0.2, -0.1);
    moved.orientation = Quat::from_rotation_z(0.2) * Quat::from_rotation_x(0.1);
    body.set_state(moved);
    body.set_prev_state(prev);

    body.rewind_along(&[Vec3A::Z]);

    // The sideways slide and the spin about the normal stay
    let state = body.state();
    assert_vec_near(state.pos, Vec3A::new(0.3, -0.2, 0.0), EPSILON);
    assert!(
        state.orientation.abs_diff_eq(Quat::from_rotation_z(0.2), EPSILON),
        "{}",
        state.orientation
    );

    // Moving away from the face is kept as well
    moved.pos.z = 0.1;
    body.set_state(moved);
    body.set_prev_state(prev);
    body.rewind_along(&[Vec3A::Z]);
    assert_vec_near(body.state().pos, Vec3A::new(0.3, -0.2, 0.1), EPSILON);
}

#[test]
fn test_rewind_along_several_normals() {
    let mut body = BodySetup::unit_cube(true, Vec3A::ZERO).build();
    let prev = *body.prev_state();

    let mut moved = prev;
    moved.pos = Vec3A::new(0.3, -0.2, -0.1);
    moved.orientation = Quat::from_rotation_z(0.2) * Quat::from_rotation_x(0.1);
    body.set_state(moved);
    body.set_prev_state(prev);

    body.rewind_along(&[Vec3A::Z, Vec3A::NEG_X]);

    let state = body.state();
    assert_vec_near(state.pos, Vec3A::new(0.0, -0.2, 0.0), EPSILON);
    assert!(state.orientation.abs_diff_eq(prev.orientation, EPSILON));

    // Nothing to rewind against
    body.set_state(moved);
    body.set_prev_state(prev);
    let before = *body.state();
    body.rewind_along(&[]);
    assert_eq!(*body.state(), before);
}

#[test]
fn test_rewind_can_be_disabled() {
    let mut world = falling_point_world(WorldConfig {
        rewind_on_contact: false,
        ..WorldConfig::DEFAULT
    });

    world.detect_collisions();
    assert_eq!(world.resolve_collisions(), 1);

    let point = &world.bodies()[0];
    assert_eq!(point.state().pos.z, -0.01);
    assert_eq!(point.state(), point.prev_state());
}

#[test]
fn test_penalty_contacts_survive_until_simulate() {
    let mut world = falling_point_world(WorldConfig {
        contact_model: ContactModel::Penalty,
        ..WorldConfig::DEFAULT
    });

    assert_eq!(world.detect_collisions(), 1);
    assert_eq!(world.resolve_collisions(), 0);

    let point = &world.bodies()[0];
    assert_eq!(point.contacts().len(), 1);
    assert_vec_near(point.state().lin_momentum, Vec3A::new(0.0, 0.0, -2.0), EPSILON);

    world.simulate(0.01);
    let point = &world.bodies()[0];
    assert!(point.contacts().is_empty());
    // The penalty force pushed back along the face normal
    assert!(point.state().lin_momentum.z > -2.0);
}

#[test]
fn test_apply_impulse_changes_both_momenta() {
    let mut body = BodySetup::unit_cube(true, Vec3A::ZERO).build();
    body.apply_impulse(Vec3A::new(0.0, 0.0, 1.0), CORNER);

    let state: PhysState = *body.state();
    assert_eq!(state.lin_momentum, Vec3A::Z);
    assert_vec_near(state.ang_momentum, CORNER.cross(Vec3A::Z), EPSILON);
}
