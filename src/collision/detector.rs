use glam::Vec3A;
use log::trace;

use super::{Contact, narrowphase::SweptVertexFace};
use crate::{
    mesh::{Face, Tri, Vertex},
    sim::{Body, PhysState},
};

/// World-space vertex positions and face normals of a body at its previous and current poses.
///
/// Buffers are refilled in place once per detection pass.
#[derive(Clone, Debug, Default)]
pub(crate) struct SweptPose {
    cur_points: Vec<Vec3A>,
    prev_points: Vec<Vec3A>,
    cur_normals: Vec<Vec3A>,
    prev_normals: Vec<Vec3A>,
}

impl SweptPose {
    pub fn refresh(
        &mut self,
        vertices: &[Vertex],
        faces: &[Face],
        cur: &PhysState,
        prev: &PhysState,
    ) {
        Self::fill_points(&mut self.cur_points, vertices, cur);
        Self::fill_points(&mut self.prev_points, vertices, prev);
        Self::fill_normals(&mut self.cur_normals, vertices, faces, cur);
        Self::fill_normals(&mut self.prev_normals, vertices, faces, prev);
    }

    fn fill_points(out: &mut Vec<Vec3A>, vertices: &[Vertex], state: &PhysState) {
        out.clear();
        out.extend(vertices.iter().map(|v| state.to_world(v.pos)));
    }

    fn fill_normals(out: &mut Vec<Vec3A>, vertices: &[Vertex], faces: &[Face], state: &PhysState) {
        out.clear();
        out.extend(
            faces
                .iter()
                .map(|face| state.orientation * vertices[face.normal_vertex()].normal),
        );
    }

    #[inline]
    fn tri(points: &[Vec3A], face: Face) -> Tri {
        let [a, b, c] = face.0;
        Tri::from_points(points[a], points[b], points[c])
    }
}

/// Tests every vertex of `penetrating` against every face of `penetrated`.
///
/// Each hit appends a single-point contact to `penetrating` and a three-point contact on the
/// crossed face to `penetrated`, with opposite normals. Both bodies' swept poses must be fresh.
/// Returns the number of hits.
pub fn detect_pair(penetrating: &mut Body, penetrated: &mut Body) -> usize {
    let vertex_pose = &penetrating.swept;
    if vertex_pose.cur_points.is_empty() {
        return 0;
    }

    let face_pose = &penetrated.swept;
    let mut hits = 0;

    for (face_idx, &face) in penetrated.faces.iter().enumerate() {
        let cur_tri = SweptPose::tri(&face_pose.cur_points, face);
        let prev_tri = SweptPose::tri(&face_pose.prev_points, face);
        let cur_normal = face_pose.cur_normals[face_idx];
        let prev_normal = face_pose.prev_normals[face_idx];

        for (&prev_point, &cur_point) in vertex_pose.prev_points.iter().zip(&vertex_pose.cur_points)
        {
            let test = SweptVertexFace {
                prev_point,
                cur_point,
                prev_tri,
                cur_tri,
                prev_normal,
                cur_normal,
            };

            if !test.hits() {
                continue;
            }

            trace!("Vertex at {cur_point} crossed face {face_idx} (normal {cur_normal})");

            penetrating
                .contacts
                .push(Contact::vertex(cur_point, cur_normal));
            penetrated
                .contacts
                .push(Contact::face(cur_tri.0, -cur_normal));
            hits += 1;
        }
    }

    hits
}
