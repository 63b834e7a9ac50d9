use glam::Vec3A;

/// Gravity acceleration, Z is up
pub const GRAVITY: Vec3A = Vec3A::new(0.0, 0.0, -9.81);

/// Mass given to every vertex when no total mass is specified
pub const VERTEX_MASS: f32 = 1.0;

/// The placeholder inertia tensor is `mass * INERTIA_SCALE * I`, exact for a unit cube
pub const INERTIA_SCALE: f32 = 1.0 / 6.0;

/// Scale of the force each pending contact contributes under the penalty contact model
pub const CONTACT_FORCE_SCALE: f32 = 50.0;

/// Coefficient of restitution used by the impulse resolver
pub const RESTITUTION: f32 = 0.0;

pub const DEFAULT_TIME_STEP: f32 = 1.0 / 120.0;
pub const MIN_TIME_STEP: f32 = 1.0 / 10_000.0;
pub const MAX_TIME_STEP: f32 = 1.0 / 15.0;

/// Projected triangles with a doubled area below this are treated as degenerate
pub const DEGENERATE_AREA_EPSILON: f32 = 1e-12;

/// Unit normals whose dot product is within this of 1 count as the same direction
pub const NORMAL_MATCH_EPSILON: f32 = 1e-6;

/// Smallest inertia tensor determinant accepted for a dynamic body
pub const MIN_INERTIA_DETERMINANT: f32 = 1e-12;
