use glam::{Mat3A, Quat, Vec3A};
use log::debug;

use super::PhysState;
use crate::{
    collision::{Contact, ContactBuffer, SweptPose},
    consts,
    math::{Mat3Ext, QuatExt, inv_inertia_world},
    mesh::{Edge, Face, Mesh, Vertex},
};

pub struct BodyConstructionInfo {
    pub mesh: Mesh,
    pub is_dynamic: bool,
    /// Total mass, spread evenly over the vertices.
    /// If None, every vertex weighs `consts::VERTEX_MASS`
    pub mass: Option<f32>,
    /// Body-local inertia tensor.
    /// If None, the uniform placeholder `mass * consts::INERTIA_SCALE * I` is used
    pub inertia: Option<Mat3A>,
}

impl BodyConstructionInfo {
    #[must_use]
    pub const fn new(mesh: Mesh, is_dynamic: bool) -> Self {
        Self {
            mesh,
            is_dynamic,
            mass: None,
            inertia: None,
        }
    }

    #[must_use]
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }

    #[must_use]
    pub fn with_inertia(mut self, inertia: Mat3A) -> Self {
        self.inertia = Some(inertia);
        self
    }
}

/// A rigid object: fixed local geometry plus a mutable world pose and momenta.
pub struct Body {
    /// Relative to the center of mass
    pub(crate) vertices: Box<[Vertex]>,
    pub(crate) faces: Box<[Face]>,
    edges: Box<[Edge]>,
    vertex_masses: Box<[f32]>,
    mass: f32,
    inverse_mass: f32,
    inertia_local: Mat3A,
    inv_inertia_local: Mat3A,
    is_dynamic: bool,
    pub(crate) state: PhysState,
    pub(crate) prev_state: PhysState,
    pub(crate) contacts: ContactBuffer,
    pub(crate) swept: SweptPose,
}

impl Body {
    /// Builds a body from mesh data.
    ///
    /// The body is placed at its center of mass with identity orientation, so its world vertices
    /// initially match the mesh positions.
    ///
    /// # Panics
    ///
    /// If the body is dynamic and its mass is not strictly positive
    /// or its inertia tensor is singular.
    #[must_use]
    pub fn new(info: BodyConstructionInfo) -> Self {
        let num_vertices = info.mesh.vertices().len();
        let vertex_masses: Box<[f32]> = match info.mass {
            Some(total) if num_vertices != 0 => {
                vec![total / num_vertices as f32; num_vertices].into_boxed_slice()
            }
            _ => vec![consts::VERTEX_MASS; num_vertices].into_boxed_slice(),
        };

        let props = info.mesh.mass_properties(&vertex_masses);
        let (vertices, faces, edges) = info.mesh.into_parts();
        let inertia_local = info
            .inertia
            .unwrap_or(Mat3A::IDENTITY * (props.mass * consts::INERTIA_SCALE));

        let (inverse_mass, inv_inertia_local) = if info.is_dynamic {
            assert!(
                props.mass > 0.0,
                "Body::new(): dynamic body needs a strictly positive mass (got {})",
                props.mass
            );

            let Some(inv_inertia_local) = inertia_local.try_inverse() else {
                panic!("Body::new(): dynamic body has a singular inertia tensor ({inertia_local})");
            };

            debug!(
                "Dynamic body with {} vertices, mass {} and center of mass {}",
                vertices.len(),
                props.mass,
                props.center
            );

            (1.0 / props.mass, inv_inertia_local)
        } else {
            debug!(
                "Static body with {} vertices and {} faces",
                vertices.len(),
                faces.len()
            );

            (0.0, Mat3A::ZERO)
        };

        let vertices = vertices
            .into_iter()
            .map(|v| Vertex::new(v.pos - props.center, v.normal.normalize_or_zero()))
            .collect();

        let state = PhysState::at(props.center);

        Self {
            vertices,
            faces: faces.into_boxed_slice(),
            edges: edges.into_boxed_slice(),
            vertex_masses,
            mass: props.mass,
            inverse_mass,
            inertia_local,
            inv_inertia_local,
            is_dynamic: info.is_dynamic,
            state,
            prev_state: state,
            contacts: ContactBuffer::default(),
            swept: SweptPose::default(),
        }
    }

    #[must_use]
    #[inline]
    pub const fn is_dynamic(&self) -> bool {
        self.is_dynamic
    }

    #[must_use]
    #[inline]
    pub const fn state(&self) -> &PhysState {
        &self.state
    }

    /// State at the end of the last completed frame
    #[must_use]
    #[inline]
    pub const fn prev_state(&self) -> &PhysState {
        &self.prev_state
    }

    /// Teleports the body: both the current and the previous state are replaced, so the move is
    /// not mistaken for a sweep through other bodies.
    pub fn set_state(&mut self, state: PhysState) {
        debug_assert!(state.is_finite());

        self.state = state;
        self.state.normalize_orientation();
        self.prev_state = self.state;
    }

    /// Replaces only the previous-frame snapshot
    pub fn set_prev_state(&mut self, state: PhysState) {
        self.prev_state = state;
    }

    #[must_use]
    #[inline]
    pub const fn mass(&self) -> f32 {
        self.mass
    }

    /// Zero for static bodies
    #[must_use]
    #[inline]
    pub const fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    #[must_use]
    #[inline]
    pub const fn inertia_local(&self) -> Mat3A {
        self.inertia_local
    }

    /// Zero for static bodies
    #[must_use]
    #[inline]
    pub const fn inv_inertia_local(&self) -> Mat3A {
        self.inv_inertia_local
    }

    #[must_use]
    pub fn inv_inertia_world(&self, state: &PhysState) -> Mat3A {
        inv_inertia_world(state.rot_mat(), self.inv_inertia_local)
    }

    #[must_use]
    pub fn linear_velocity(&self) -> Vec3A {
        self.state.lin_momentum * self.inverse_mass
    }

    #[must_use]
    pub fn angular_velocity(&self) -> Vec3A {
        self.inv_inertia_world(&self.state) * self.state.ang_momentum
    }

    /// Changes both momenta as if `impulse` hit the body at `rel_pos` from the center of mass
    pub fn apply_impulse(&mut self, impulse: Vec3A, rel_pos: Vec3A) {
        debug_assert!(!impulse.is_nan());
        debug_assert!(self.is_dynamic);

        self.state.lin_momentum += impulse;
        self.state.ang_momentum += rel_pos.cross(impulse);
    }

    /// Takes back the part of this frame's motion that carried the body into the surfaces whose
    /// unit normals are given. Does nothing without normals.
    ///
    /// Translation against each normal is undone, the rest of the translation is kept. When all
    /// normals agree, the turn around that normal is kept as well; any other rotation since the
    /// previous state is undone.
    pub fn rewind_along(&mut self, normals: &[Vec3A]) {
        let Some(&first) = normals.first() else {
            return;
        };

        let mut shift = self.state.pos - self.prev_state.pos;
        for &normal in normals {
            shift -= normal * shift.dot(normal).min(0.0);
        }
        self.state.pos = self.prev_state.pos + shift;

        let single_normal = normals
            .iter()
            .all(|normal| normal.dot(first) > 1.0 - consts::NORMAL_MATCH_EPSILON);
        let kept_turn = if single_normal {
            let turn = self.state.orientation * self.prev_state.orientation.inverse();
            turn.twist_about(first)
        } else {
            Quat::IDENTITY
        };

        self.state.orientation = (kept_turn * self.prev_state.orientation).normalize_or_identity();
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

    #[must_use]
    #[inline]
    pub fn vertex_masses(&self) -> &[f32] {
        &self.vertex_masses
    }

    #[must_use]
    #[inline]
    pub const fn contacts(&self) -> &ContactBuffer {
        &self.contacts
    }

    /// Queues a contact for the next resolution pass, returns false if it was already queued
    pub fn push_contact(&mut self, contact: Contact) -> bool {
        self.contacts.push(contact)
    }

    pub fn clear_contacts(&mut self) {
        self.contacts.clear();
    }

    /// Recomputes the world-space vertices and face normals used by the detector
    pub fn refresh_swept_pose(&mut self) {
        self.swept
            .refresh(&self.vertices, &self.faces, &self.state, &self.prev_state);
    }

    /// World-space vertices at the current pose, for drawing
    pub fn world_vertices(&self) -> impl ExactSizeIterator<Item = Vertex> + '_ {
        let state = self.state;
        self.vertices
            .iter()
            .map(move |v| Vertex::new(state.to_world(v.pos), state.orientation * v.normal))
    }

    /// Writes the world-space vertices into `out`, reusing its allocation
    pub fn write_world_vertices(&self, out: &mut Vec<Vertex>) {
        out.clear();
        out.extend(self.world_vertices());
    }
}
