use glam::{Mat3A, Quat, Vec3A};

use crate::{dynamics::Derivative, math::QuatExt};

/// Dynamical state of a rigid body.
///
/// Momenta rather than velocities are integrated, velocities are derived from them through
/// the body's mass and inertia.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysState {
    /// World position of the center of mass
    pub pos: Vec3A,
    pub lin_momentum: Vec3A,
    /// Unit quaternion, body-local to world
    pub orientation: Quat,
    pub ang_momentum: Vec3A,
}

impl Default for PhysState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PhysState {
    pub const DEFAULT: Self = Self::at(Vec3A::ZERO);

    #[must_use]
    pub const fn at(pos: Vec3A) -> Self {
        Self {
            pos,
            lin_momentum: Vec3A::ZERO,
            orientation: Quat::IDENTITY,
            ang_momentum: Vec3A::ZERO,
        }
    }

    #[must_use]
    #[inline]
    pub fn rot_mat(&self) -> Mat3A {
        Mat3A::from_quat(self.orientation)
    }

    /// Body-local point to world space
    #[must_use]
    #[inline]
    pub fn to_world(&self, local: Vec3A) -> Vec3A {
        self.pos + self.orientation * local
    }

    /// `self + dt * derivative`, without renormalizing the orientation
    #[must_use]
    pub fn advanced(&self, derivative: &Derivative, dt: f32) -> Self {
        Self {
            pos: self.pos + derivative.vel * dt,
            lin_momentum: self.lin_momentum + derivative.force * dt,
            orientation: self.orientation + derivative.spin * dt,
            ang_momentum: self.ang_momentum + derivative.torque * dt,
        }
    }

    pub fn normalize_orientation(&mut self) {
        self.orientation = self.orientation.normalize_or_identity();
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite()
            && self.lin_momentum.is_finite()
            && self.orientation.is_finite()
            && self.ang_momentum.is_finite()
    }
}
