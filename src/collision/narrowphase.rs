//! Swept vertex-vs-face test.
//!
//! A vertex hits a face when it changed sides of the face's plane between the previous and the
//! current frame, and its current position lies inside the current triangle once both are
//! projected onto the coordinate plane the face normal is most aligned with.

use glam::Vec3A;

use crate::{
    consts::DEGENERATE_AREA_EPSILON,
    math::{dominant_axis, project_drop_axis},
    mesh::Tri,
};

/// Signed distance of `point` to the plane through `plane_point` with unit normal `normal`
#[must_use]
#[inline]
pub fn signed_distance(point: Vec3A, plane_point: Vec3A, normal: Vec3A) -> f32 {
    (point - plane_point).dot(normal)
}

/// Whether two signed distances lie on different sides of a plane.
///
/// A distance of exactly zero counts as the front side, so a vertex resting in the plane does not
/// register a crossing.
#[must_use]
#[inline]
pub fn crosses_plane(prev_dist: f32, cur_dist: f32) -> bool {
    (prev_dist >= 0.0) != (cur_dist >= 0.0)
}

/// Point-in-triangle test on the projection that drops the normal's dominant axis.
///
/// Points on an edge or corner are inside. Triangles whose projection has no area never contain
/// anything.
#[must_use]
pub fn point_in_triangle(point: Vec3A, tri: &Tri, normal: Vec3A) -> bool {
    let axis = dominant_axis(normal);
    let p = project_drop_axis(point, axis);
    let [a, b, c] = tri.0.map(|v| project_drop_axis(v, axis));

    let area = (b - a).perp_dot(c - a);
    if area.abs() < DEGENERATE_AREA_EPSILON {
        return false;
    }

    let e0 = (b - a).perp_dot(p - a);
    let e1 = (c - b).perp_dot(p - b);
    let e2 = (a - c).perp_dot(p - c);

    (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0)
}

/// One vertex against one face, both given at their previous and current world poses
#[derive(Clone, Copy, Debug)]
pub struct SweptVertexFace {
    pub prev_point: Vec3A,
    pub cur_point: Vec3A,
    pub prev_tri: Tri,
    pub cur_tri: Tri,
    pub prev_normal: Vec3A,
    pub cur_normal: Vec3A,
}

impl SweptVertexFace {
    #[must_use]
    pub fn crosses_plane(&self) -> bool {
        let prev_dist = signed_distance(self.prev_point, self.prev_tri.0[0], self.prev_normal);
        let cur_dist = signed_distance(self.cur_point, self.cur_tri.0[0], self.cur_normal);

        crosses_plane(prev_dist, cur_dist)
    }

    /// Full test: plane crossing, then inclusion in the current triangle
    #[must_use]
    pub fn hits(&self) -> bool {
        self.crosses_plane() && point_in_triangle(self.cur_point, &self.cur_tri, self.cur_normal)
    }
}
