use glam::Vec3A;

use super::derivative::{evaluate, forces, kinematics};
use crate::{collision::Contact, sim::Body, sim::PhysState};

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Integrator {
    /// `state + dt * derivative(state)`, one derivative evaluation
    #[default]
    ExplicitEuler,
    /// Momenta first, then pose from the updated momenta
    SemiImplicitEuler,
    /// Classic 4th order Runge-Kutta.
    /// Contacts are held fixed over the 4 stages, they are only valid at the current configuration
    Rk4,
}

impl Integrator {
    /// Advances a dynamic body by `dt` and renormalizes its orientation.
    ///
    /// `with_contacts` feeds the body's pending contacts to the derivative as penalty forces.
    /// Static bodies are left untouched.
    pub fn integrate(self, body: &mut Body, gravity: Vec3A, with_contacts: bool, dt: f32) {
        if !body.is_dynamic() {
            return;
        }

        let contacts: &[Contact] = if with_contacts {
            body.contacts.as_slice()
        } else {
            &[]
        };

        let mut next = self.advance(body, &body.state, contacts, gravity, dt);
        next.normalize_orientation();

        debug_assert!(next.is_finite(), "integration produced a non-finite state");
        body.state = next;
    }

    #[must_use]
    pub fn advance(
        self,
        body: &Body,
        state: &PhysState,
        contacts: &[Contact],
        gravity: Vec3A,
        dt: f32,
    ) -> PhysState {
        match self {
            Self::ExplicitEuler => state.advanced(&evaluate(body, state, contacts, gravity), dt),
            Self::SemiImplicitEuler => {
                let (force, torque) = forces(body, state, contacts, gravity);

                let mut next = *state;
                next.lin_momentum += force * dt;
                next.ang_momentum += torque * dt;

                let (vel, spin) = kinematics(body, &next);
                next.pos += vel * dt;
                next.orientation = next.orientation + spin * dt;
                next
            }
            Self::Rk4 => {
                let half_dt = dt * 0.5;

                let k1 = evaluate(body, state, contacts, gravity);
                let k2 = evaluate(body, &state.advanced(&k1, half_dt), contacts, gravity);
                let k3 = evaluate(body, &state.advanced(&k2, half_dt), contacts, gravity);
                let k4 = evaluate(body, &state.advanced(&k3, dt), contacts, gravity);

                let slope = (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (1.0 / 6.0);
                state.advanced(&slope, dt)
            }
        }
    }
}
