use glam::{Mat3A, Quat, Vec2, Vec3A};

use crate::consts::MIN_INERTIA_DETERMINANT;

pub trait QuatExt {
    /// Normalizes the quaternion, or returns identity when its norm collapsed to zero
    #[must_use]
    fn normalize_or_identity(self) -> Self;

    /// The part of this rotation that turns around the unit `axis`.
    ///
    /// Rotating by the twist leaves every point's coordinate along `axis` unchanged.
    #[must_use]
    fn twist_about(self, axis: Vec3A) -> Self;
}

impl QuatExt for Quat {
    fn normalize_or_identity(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq.is_finite() && len_sq > f32::MIN_POSITIVE {
            self * len_sq.sqrt().recip()
        } else {
            Self::IDENTITY
        }
    }

    fn twist_about(self, axis: Vec3A) -> Self {
        let along = axis * Vec3A::new(self.x, self.y, self.z).dot(axis);
        Self::from_xyzw(along.x, along.y, along.z, self.w).normalize_or_identity()
    }
}

pub trait Mat3Ext {
    /// Inverse of the matrix, `None` if it is (close to) singular
    fn try_inverse(&self) -> Option<Mat3A>;
}

impl Mat3Ext for Mat3A {
    fn try_inverse(&self) -> Option<Mat3A> {
        if self.determinant().abs() < MIN_INERTIA_DETERMINANT {
            None
        } else {
            Some(self.inverse())
        }
    }
}

/// Rotates a body-local inverse inertia tensor into world space: `R * I^-1 * R^T`
#[must_use]
pub fn inv_inertia_world(rot_mat: Mat3A, inv_inertia_local: Mat3A) -> Mat3A {
    rot_mat * inv_inertia_local * rot_mat.transpose()
}

/// `dq/dt = 0.5 * (w, 0) * q`
#[must_use]
pub fn quat_derivative(orientation: Quat, ang_vel: Vec3A) -> Quat {
    Quat::from_xyzw(ang_vel.x, ang_vel.y, ang_vel.z, 0.0) * orientation * 0.5
}

/// Index of the component with the largest magnitude
#[must_use]
pub fn dominant_axis(v: Vec3A) -> usize {
    let a = v.abs();
    if a.x >= a.y && a.x >= a.z {
        0
    } else if a.y >= a.z {
        1
    } else {
        2
    }
}

/// Drops the given axis, keeping the remaining two components in order
#[must_use]
pub fn project_drop_axis(v: Vec3A, axis: usize) -> Vec2 {
    match axis {
        0 => Vec2::new(v.y, v.z),
        1 => Vec2::new(v.x, v.z),
        _ => Vec2::new(v.x, v.y),
    }
}
