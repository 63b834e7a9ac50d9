mod contact;
mod detector;
pub mod narrowphase;

pub use contact::{Contact, ContactBuffer, MAX_CONTACT_POINTS};
pub use detector::detect_pair;
pub(crate) use detector::SweptPose;
