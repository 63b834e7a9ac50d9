mod geometry;
mod primitives;

pub use geometry::{Edge, Face, Tri, Vertex};

use ahash::AHashMap;
use glam::Vec3A;

/// Fixed-topology triangle mesh handed to the simulation by a mesh supplier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    edges: Vec<Edge>,
}

/// Mass and center of mass of a set of weighted vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassProperties {
    pub mass: f32,
    pub center: Vec3A,
}

impl Mesh {
    /// Builds faces and edges from a flat triangle index list.
    ///
    /// # Panics
    ///
    /// If the index count is not a multiple of 3 or an index is out of range.
    #[must_use]
    pub fn new(vertices: Vec<Vertex>, indices: &[usize]) -> Self {
        assert_eq!(
            indices.len() % 3,
            0,
            "Mesh::new(): index count ({}) is not a multiple of 3",
            indices.len()
        );

        if let Some(&bad) = indices.iter().find(|&&i| i >= vertices.len()) {
            panic!(
                "Mesh::new(): index {bad} is out of range ({} vertices)",
                vertices.len()
            );
        }

        let faces: Vec<Face> = indices
            .chunks_exact(3)
            .map(|ids| Face::new(ids[0], ids[1], ids[2]))
            .collect();
        let edges = faces.iter().flat_map(|face| face.edges()).collect();

        Self {
            vertices,
            faces,
            edges,
        }
    }

    /// Builds a mesh from a triangle soup, every 3 consecutive corners making one face.
    ///
    /// Corners sharing a position are merged into a single vertex which keeps the
    /// normal of the first corner seen at that position.
    #[must_use]
    pub fn from_corners<I: IntoIterator<Item = Vertex>>(corners: I) -> Self {
        let corners = corners.into_iter();
        let mut unique = AHashMap::with_capacity(corners.size_hint().0);
        let mut vertices = Vec::new();
        let mut indices = Vec::with_capacity(corners.size_hint().0);

        for corner in corners {
            let key = corner.pos.to_array().map(f32::to_bits);
            let index = *unique.entry(key).or_insert_with(|| {
                vertices.push(corner);
                vertices.len() - 1
            });
            indices.push(index);
        }

        Self::new(vertices, &indices)
    }

    /// Builds a mesh from bare positions, deriving each vertex normal from the
    /// area-weighted normals of the faces around it.
    #[must_use]
    pub fn from_positions(positions: &[Vec3A], indices: &[usize]) -> Self {
        let mut normals = vec![Vec3A::ZERO; positions.len()];
        for ids in indices.chunks_exact(3) {
            if ids.iter().any(|&i| i >= positions.len()) {
                continue;
            }

            let tri = Tri::from_points(positions[ids[0]], positions[ids[1]], positions[ids[2]]);
            let area_normal = tri.area_normal();
            for &i in ids {
                normals[i] += area_normal;
            }
        }

        let vertices = positions
            .iter()
            .zip(normals)
            .map(|(&pos, normal)| Vertex::new(pos, normal.normalize_or_zero()))
            .collect();

        Self::new(vertices, indices)
    }

    #[must_use]
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[must_use]
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The flat index list the faces were built from
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.faces.iter().flat_map(|face| face.0).collect()
    }

    /// Mass and mass-weighted center of the vertices.
    ///
    /// With uniform masses the center is the arithmetic mean of the vertex positions.
    #[must_use]
    pub fn mass_properties(&self, vertex_masses: &[f32]) -> MassProperties {
        debug_assert_eq!(vertex_masses.len(), self.vertices.len());

        let mass: f32 = vertex_masses.iter().sum();
        if mass <= 0.0 {
            return MassProperties {
                mass,
                center: Vec3A::ZERO,
            };
        }

        let weighted = self
            .vertices
            .iter()
            .zip(vertex_masses)
            .fold(Vec3A::ZERO, |acc, (vertex, &m)| acc + vertex.pos * m);

        MassProperties {
            mass,
            center: weighted / mass,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<Vertex>, Vec<Face>, Vec<Edge>) {
        (self.vertices, self.faces, self.edges)
    }
}
