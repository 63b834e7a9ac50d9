mod body;
mod controls;
mod phys_state;
mod world;
mod world_config;

pub use body::{Body, BodyConstructionInfo};
pub use controls::SimControls;
pub use phys_state::PhysState;
pub use world::{BodyId, StepStats, World};
pub use world_config::{ContactModel, WorldConfig};
