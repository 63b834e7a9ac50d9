use glam::Vec3A;

use super::SimControls;
use crate::{consts, dynamics::Integrator};

/// How contacts change a body's motion. A world uses exactly one.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum ContactModel {
    /// The resolver turns contacts into instantaneous impulses right after detection
    #[default]
    Impulse,
    /// Contacts survive until the next simulate phase, where they act as penalty forces
    Penalty,
}

#[derive(Clone, Copy, Debug)]
pub struct WorldConfig {
    /// Acceleration applied to every dynamic body
    pub gravity: Vec3A,
    pub integrator: Integrator,
    pub contact_model: ContactModel,
    /// Bodies pushed off a surface give back the part of the frame's motion that went into it.
    /// Off, only their momenta carry the collision response
    pub rewind_on_contact: bool,
    /// Also test the vertices of the later body of each pair against the faces of the earlier one
    pub two_sided: bool,
    pub controls: SimControls,
    /// Optional RNG seed for deterministic scattering.
    /// If None, a random seed will be used
    pub rng_seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl WorldConfig {
    pub const DEFAULT: Self = Self {
        gravity: consts::GRAVITY,
        integrator: Integrator::ExplicitEuler,
        contact_model: ContactModel::Impulse,
        rewind_on_contact: true,
        two_sided: false,
        controls: SimControls::DEFAULT,
        rng_seed: None,
    };
}
