use glam::Vec3A;

/// A mesh vertex: position and normal, both in the mesh's local space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub pos: Vec3A,
    pub normal: Vec3A,
}

impl Vertex {
    #[must_use]
    #[inline]
    pub const fn new(pos: Vec3A, normal: Vec3A) -> Self {
        Self { pos, normal }
    }
}

/// A triangle, as three indices into the owning mesh's vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Face(pub [usize; 3]);

impl Face {
    #[must_use]
    #[inline]
    pub const fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self([v1, v2, v3])
    }

    /// The vertex whose normal stands in for the face normal
    #[must_use]
    #[inline]
    pub const fn normal_vertex(self) -> usize {
        self.0[0]
    }

    /// The three edges, following the winding order
    #[must_use]
    pub const fn edges(self) -> [Edge; 3] {
        let [v1, v2, v3] = self.0;
        [Edge([v1, v2]), Edge([v2, v3]), Edge([v3, v1])]
    }
}

/// A directed edge between two vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge(pub [usize; 2]);

/// A triangle made from 3 points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tri(pub [Vec3A; 3]);

impl Tri {
    #[must_use]
    #[inline]
    pub const fn from_points(p0: Vec3A, p1: Vec3A, p2: Vec3A) -> Self {
        Self([p0, p1, p2])
    }

    /// Unnormalized normal, its length is twice the triangle's area
    #[must_use]
    #[inline]
    pub fn area_normal(&self) -> Vec3A {
        (self.0[1] - self.0[0]).cross(self.0[2] - self.0[0])
    }
}
