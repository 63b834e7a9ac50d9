use std::{
    fs,
    io::{self, Cursor, Write},
    path::Path,
};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::Vec3A;
use log::info;

use crate::mesh::Mesh;

pub const MESH_FILE_EXTENSION: &str = "cmf";
pub const MAX_VERT_OR_TRI_COUNT: usize = 1000 * 1000;

trait FromCursor {
    fn from_cursor(bytes: &mut Cursor<&[u8]>) -> io::Result<Self>
    where
        Self: Sized;
}

impl FromCursor for Vec3A {
    fn from_cursor(bytes: &mut Cursor<&[u8]>) -> io::Result<Self> {
        Ok(Self::new(
            bytes.read_f32::<LittleEndian>()?,
            bytes.read_f32::<LittleEndian>()?,
            bytes.read_f32::<LittleEndian>()?,
        ))
    }
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Triangle mesh as stored on disk.
///
/// Layout, all little-endian: `i32` triangle count, `i32` vertex count, 3 `i32` indices per
/// triangle, then 3 `f32` per vertex position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshFile {
    indices: Vec<usize>,
    positions: Vec<Vec3A>,
}

impl MeshFile {
    /// # Panics
    ///
    /// If the index count is not a multiple of 3 or an index is out of range.
    #[must_use]
    pub fn new(indices: Vec<usize>, positions: Vec<Vec3A>) -> Self {
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| i < positions.len()));

        Self { indices, positions }
    }

    /// Captures the vertex positions and faces of a mesh; normals are not stored
    #[must_use]
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            indices: mesh.indices(),
            positions: mesh.vertices().iter().map(|vertex| vertex.pos).collect(),
        }
    }

    #[must_use]
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[must_use]
    #[inline]
    pub fn positions(&self) -> &[Vec3A] {
        &self.positions
    }

    #[must_use]
    #[inline]
    pub fn num_tris(&self) -> usize {
        self.indices.len() / 3
    }

    /// Builds the mesh, with vertex normals derived from the surrounding faces
    #[must_use]
    pub fn into_mesh(self) -> Mesh {
        Mesh::from_positions(&self.positions, &self.indices)
    }

    pub fn read_from_file(file_path: &Path) -> io::Result<Self> {
        let bytes = fs::read(file_path)?;
        let file = Self::read_from_bytes(&bytes).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("Invalid mesh file at {file_path:?}: {err}"),
            )
        })?;

        info!(
            "Loaded {} verts and {} tris from {file_path:?}",
            file.positions.len(),
            file.num_tris()
        );

        Ok(file)
    }

    pub fn read_from_bytes(bytes: &[u8]) -> io::Result<Self> {
        let mut bytes = Cursor::new(bytes);

        let num_tris = bytes.read_i32::<LittleEndian>()?;
        let num_vertices = bytes.read_i32::<LittleEndian>()?;

        let count_ok = |count: i32| count > 0 && count as usize <= MAX_VERT_OR_TRI_COUNT;
        if !count_ok(num_tris) || !count_ok(num_vertices) {
            return Err(invalid_data(format!(
                "bad triangle/vertex count: [{num_tris}, {num_vertices}]"
            )));
        }

        let num_indices = num_tris as usize * 3;
        let num_vertices = num_vertices as usize;

        let indices = (0..num_indices)
            .map(|_| {
                let index = bytes.read_i32::<LittleEndian>()?;
                usize::try_from(index)
                    .ok()
                    .filter(|&i| i < num_vertices)
                    .ok_or_else(|| {
                        invalid_data(format!(
                            "bad triangle vertex index {index} ({num_vertices} vertices)"
                        ))
                    })
            })
            .collect::<io::Result<Vec<_>>>()?;

        let positions = (0..num_vertices)
            .map(|_| Vec3A::from_cursor(&mut bytes))
            .collect::<io::Result<Vec<_>>>()?;

        if let Some(bad) = positions.iter().find(|pos| !pos.is_finite()) {
            return Err(invalid_data(format!("non-finite vertex position {bad}")));
        }

        Ok(Self { indices, positions })
    }

    /// # Errors
    ///
    /// Besides write errors, fails with `InvalidInput` if the mesh is empty
    /// or too large to be read back.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let num_tris = self.num_tris();
        let num_vertices = self.positions.len();

        if num_tris.min(num_vertices) == 0 || num_tris.max(num_vertices) > MAX_VERT_OR_TRI_COUNT {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot store a mesh with {num_tris} tris and {num_vertices} verts"),
            ));
        }

        writer.write_i32::<LittleEndian>(num_tris as i32)?;
        writer.write_i32::<LittleEndian>(num_vertices as i32)?;

        for &index in &self.indices {
            writer.write_i32::<LittleEndian>(index as i32)?;
        }

        for pos in &self.positions {
            for coord in pos.to_array() {
                writer.write_f32::<LittleEndian>(coord)?;
            }
        }

        Ok(())
    }

    pub fn write_to_file(&self, file_path: &Path) -> io::Result<()> {
        let mut bytes = Vec::with_capacity(8 + self.indices.len() * 4 + self.positions.len() * 12);
        self.write_to(&mut bytes)?;
        fs::write(file_path, bytes)
    }
}

impl From<MeshFile> for Mesh {
    fn from(file: MeshFile) -> Self {
        file.into_mesh()
    }
}
