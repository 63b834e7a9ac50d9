mod scenario;

mod resolution_test;

pub use setup::*;
pub use scenario::*;
