use std::ops::AddAssign;

use glam::{Mat3A, Vec3A};

use crate::{collision::Contact, consts::RESTITUTION, sim::Body, sim::PhysState};

/// Impulse magnitude that cancels the normal velocity `vn` of a point at `rel_pos`.
///
/// The denominator is the effective inverse mass along `normal`, translational plus rotational.
#[must_use]
pub fn impulse_magnitude(
    inverse_mass: f32,
    inv_inertia_world: Mat3A,
    rel_pos: Vec3A,
    normal: Vec3A,
    vn: f32,
) -> f32 {
    let angular = (inv_inertia_world * rel_pos.cross(normal)).cross(rel_pos);
    let denom = inverse_mass + normal.dot(angular);

    if denom <= 0.0 {
        return 0.0;
    }

    -(1.0 + RESTITUTION) * vn / denom
}

/// Momentum changes gathered from a body's contacts before being applied at once
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImpulseSum {
    pub lin_momentum: Vec3A,
    pub ang_momentum: Vec3A,
    /// Contact points that contributed
    pub num_points: usize,
}

impl AddAssign for ImpulseSum {
    fn add_assign(&mut self, rhs: Self) {
        self.lin_momentum += rhs.lin_momentum;
        self.ang_momentum += rhs.ang_momentum;
        self.num_points += rhs.num_points;
    }
}

/// Impulses of one contact against a fixed snapshot of the body's momenta.
///
/// Each point gets `1 / num_points` of its impulse, so a face contact spreads its response
/// over the 3 corners. Points already moving away along the normal contribute nothing.
#[must_use]
pub fn contact_impulse(
    body: &Body,
    snapshot: &PhysState,
    inv_inertia_world: Mat3A,
    contact: &Contact,
) -> ImpulseSum {
    let share = 1.0 / contact.num_points() as f32;
    let normal = contact.normal;

    let lin_vel = snapshot.lin_momentum * body.inverse_mass();
    let ang_vel = inv_inertia_world * snapshot.ang_momentum;

    let mut sum = ImpulseSum::default();
    for &point in &contact.points {
        let rel_pos = point - snapshot.pos;
        let vn = (lin_vel + ang_vel.cross(rel_pos)).dot(normal);
        if vn >= 0.0 {
            continue;
        }

        let magnitude =
            impulse_magnitude(body.inverse_mass(), inv_inertia_world, rel_pos, normal, vn);
        let impulse = normal * (magnitude * share);

        sum.lin_momentum += impulse;
        sum.ang_momentum += rel_pos.cross(impulse);
        sum.num_points += 1;
    }

    sum
}

/// Consumes the body's pending contacts.
///
/// Every contact is evaluated against the momenta the body had before resolution started, and
/// the impulses are applied together afterwards. Static bodies only get their contacts cleared.
/// Returns the number of contact points that received an impulse.
pub fn resolve_body(body: &mut Body) -> usize {
    resolve_body_with_normals(body, &mut Vec::new())
}

/// Same as [`resolve_body`], and fills `normals` with the distinct normals of the contacts that
/// received an impulse.
pub fn resolve_body_with_normals(body: &mut Body, normals: &mut Vec<Vec3A>) -> usize {
    normals.clear();

    if !body.is_dynamic() || body.contacts.is_empty() {
        body.contacts.clear();
        return 0;
    }

    let snapshot = body.state;
    let inv_inertia_world = body.inv_inertia_world(&snapshot);

    let mut total = ImpulseSum::default();
    for contact in &body.contacts {
        let sum = contact_impulse(body, &snapshot, inv_inertia_world, contact);
        if sum.num_points != 0 && !normals.contains(&contact.normal) {
            normals.push(contact.normal);
        }

        total += sum;
    }

    body.state.lin_momentum += total.lin_momentum;
    body.state.ang_momentum += total.ang_momentum;
    debug_assert!(body.state.is_finite(), "contact resolution produced a non-finite state");

    body.contacts.clear();
    total.num_points
}
