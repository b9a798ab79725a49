//! Plenum Core
//!
//! Foundational primitives shared across the Plenum data-center airflow
//! simulation:
//!
//! - **Vector math**: `Vec3` and the component-wise operations the
//!   simulation loops are written in terms of
//! - **Color**: RGBA color with linear interpolation, used as the
//!   per-particle visual tag
//! - **RNG**: a small deterministic `Xorshift32` generator so particle
//!   spawning is reproducible in tests

pub mod color;
pub mod math;
pub mod rng;

pub use color::Color;
pub use math::Vec3;
pub use rng::Xorshift32;
