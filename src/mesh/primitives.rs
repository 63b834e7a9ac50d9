use glam::Vec3A;

use super::{Mesh, Tri, Vertex};

/// Quad corners in winding order, as multiples of the two tangents
const QUAD_CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
const QUAD_INDICES: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Outward normal and two tangents per box side, with `u x v == n`
const BOX_SIDES: [(Vec3A, Vec3A, Vec3A); 6] = [
    (Vec3A::X, Vec3A::Y, Vec3A::Z),
    (Vec3A::NEG_X, Vec3A::Z, Vec3A::Y),
    (Vec3A::Y, Vec3A::Z, Vec3A::X),
    (Vec3A::NEG_Y, Vec3A::X, Vec3A::Z),
    (Vec3A::Z, Vec3A::X, Vec3A::Y),
    (Vec3A::NEG_Z, Vec3A::Y, Vec3A::X),
];

impl Mesh {
    /// Axis-aligned box centered on the origin.
    ///
    /// Every side has its own 4 vertices so each face's normal vertex carries the true side normal.
    #[must_use]
    pub fn cuboid(half_extents: Vec3A) -> Self {
        let mut vertices = Vec::with_capacity(BOX_SIDES.len() * 4);
        let mut indices = Vec::with_capacity(BOX_SIDES.len() * QUAD_INDICES.len());

        for (n, u, v) in BOX_SIDES {
            let base = vertices.len();
            vertices.extend(
                QUAD_CORNERS
                    .iter()
                    .map(|&(su, sv)| Vertex::new((n + u * su + v * sv) * half_extents, n)),
            );
            indices.extend(QUAD_INDICES.iter().map(|i| base + i));
        }

        Self::new(vertices, &indices)
    }

    /// Two-triangle rectangle in the Z=0 plane facing +Z
    #[must_use]
    pub fn quad(half_x: f32, half_y: f32) -> Self {
        let vertices = QUAD_CORNERS
            .iter()
            .map(|&(sx, sy)| Vertex::new(Vec3A::new(sx * half_x, sy * half_y, 0.0), Vec3A::Z))
            .collect();

        Self::new(vertices, &QUAD_INDICES)
    }

    /// Single triangle, counter-clockwise winding gives the normal
    #[must_use]
    pub fn triangle(p0: Vec3A, p1: Vec3A, p2: Vec3A) -> Self {
        let normal = Tri::from_points(p0, p1, p2).area_normal().normalize_or_zero();
        let vertices = [p0, p1, p2]
            .into_iter()
            .map(|pos| Vertex::new(pos, normal))
            .collect();

        Self::new(vertices, &[0, 1, 2])
    }

    /// A lone vertex with no faces, to test against other bodies' faces
    #[must_use]
    pub fn point(pos: Vec3A) -> Self {
        Self::new(vec![Vertex::new(pos, Vec3A::Z)], &[])
    }
}
