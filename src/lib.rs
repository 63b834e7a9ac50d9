pub mod camera;
pub mod collision;
pub mod collision_mesh_file;
pub mod consts;
pub mod dynamics;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod sim;

pub use glam;

pub use collision::{Contact, ContactBuffer};
pub use dynamics::Integrator;
pub use mesh::{Mesh, Vertex};
pub use sim::{
    Body, BodyConstructionInfo, BodyId, ContactModel, PhysState, SimControls, StepStats, World,
    WorldConfig,
};
