pub mod derivative;
pub mod impulse_solver;
mod integrator;

pub use derivative::Derivative;
pub use integrator::Integrator;
