use std::ops::{Add, Mul};

use glam::{Quat, Vec3A};

use crate::{
    collision::Contact, consts::CONTACT_FORCE_SCALE, math::quat_derivative, sim::Body,
    sim::PhysState,
};

/// Time derivative of a `PhysState`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Derivative {
    /// d(pos)/dt
    pub vel: Vec3A,
    /// d(orientation)/dt
    pub spin: Quat,
    /// d(lin_momentum)/dt
    pub force: Vec3A,
    /// d(ang_momentum)/dt
    pub torque: Vec3A,
}

impl Default for Derivative {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Derivative {
    pub const ZERO: Self = Self {
        vel: Vec3A::ZERO,
        spin: Quat::from_xyzw(0.0, 0.0, 0.0, 0.0),
        force: Vec3A::ZERO,
        torque: Vec3A::ZERO,
    };
}

impl Add for Derivative {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            vel: self.vel + rhs.vel,
            spin: self.spin + rhs.spin,
            force: self.force + rhs.force,
            torque: self.torque + rhs.torque,
        }
    }
}

impl Mul<f32> for Derivative {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self {
            vel: self.vel * rhs,
            spin: self.spin * rhs,
            force: self.force * rhs,
            torque: self.torque * rhs,
        }
    }
}

/// Velocity and orientation rate of `state`, derived from its momenta
#[must_use]
pub fn kinematics(body: &Body, state: &PhysState) -> (Vec3A, Quat) {
    let vel = state.lin_momentum * body.inverse_mass();
    let ang_vel = body.inv_inertia_world(state) * state.ang_momentum;

    (vel, quat_derivative(state.orientation, ang_vel))
}

/// Gravity plus one penalty force per contact, and the torque of the contact forces.
///
/// A contact's force is shared evenly by its points for the torque, so a face contact
/// turns the body as if pushed at the face's centroid.
#[must_use]
pub fn forces(
    body: &Body,
    state: &PhysState,
    contacts: &[Contact],
    gravity: Vec3A,
) -> (Vec3A, Vec3A) {
    let mut force = gravity * body.mass();
    let mut torque = Vec3A::ZERO;

    for contact in contacts {
        let contact_force = contact.normal * CONTACT_FORCE_SCALE;
        force += contact_force;

        let share = 1.0 / contact.num_points() as f32;
        for &point in &contact.points {
            torque += (point - state.pos).cross(contact_force) * share;
        }
    }

    (force, torque)
}

/// Derivative of a candidate `state` of `body`, static bodies always yield `Derivative::ZERO`
#[must_use]
pub fn evaluate(
    body: &Body,
    state: &PhysState,
    contacts: &[Contact],
    gravity: Vec3A,
) -> Derivative {
    if !body.is_dynamic() {
        return Derivative::ZERO;
    }

    let (vel, spin) = kinematics(body, state);
    let (force, torque) = forces(body, state, contacts, gravity);

    Derivative {
        vel,
        spin,
        force,
        torque,
    }
}
