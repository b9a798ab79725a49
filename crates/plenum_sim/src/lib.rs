//! Data-center airflow particle simulation
//!
//! Models the air in a server room as two populations of massless tracer
//! particles: hot exhaust streaming out of server racks and cold supply
//! air washing in from the room coolers. Particles collide with room
//! geometry, annihilate each other where hot meets cold, and are drawn
//! toward rack intake panels, making recirculation and short-circuiting
//! of airflow directly visible.
//!
//! The crate is deterministic, single-threaded, and renderer-agnostic.
//! [`sim::AirflowSim`] is the entry point:
//!
//! ```
//! use plenum_sim::scene::{ColliderShape, Transform};
//! use plenum_sim::sim::{AirflowSim, SimConfig};
//! use plenum_core::Vec3;
//!
//! let mut sim = AirflowSim::new(SimConfig::default());
//! sim.add_collidable(Transform::identity(), ColliderShape::floor(0.0));
//! sim.register_rack(
//!     Transform::at(2.0, 1.0, 0.0),
//!     ColliderShape::centered_box(Vec3::new(0.4, 1.0, 0.6)),
//! );
//! sim.register_cooler(
//!     Transform::at(-6.0, 2.0, 0.0),
//!     ColliderShape::centered_box(Vec3::new(0.5, 0.5, 2.0)),
//! );
//! sim.step();
//! ```

pub mod math;
pub mod render;
pub mod scene;
pub mod sim;

pub use math::{BoundingBox, BoundingSphere, Quat};
pub use render::{write_instances, ParticleInstance};
pub use scene::{ColliderShape, NodeId, Ray, RayFilter, RayHit, Scene, Transform};
pub use sim::{AirflowSim, AttractionConfig, CollisionConfig, SimConfig};
