//! Math utilities for the 3D simulation

mod bounds;
mod quat;

pub use bounds::{BoundingBox, BoundingSphere};
pub use quat::Quat;

// Re-export common math types from plenum_core
pub use plenum_core::Vec3;
