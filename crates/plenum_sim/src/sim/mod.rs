//! Airflow particle simulation
//!
//! The pipeline, once per frame: every pool integrates its particles and
//! probes them against scene geometry, hot and cold pools annihilate
//! where they meet, and the rack intake attractors steer the surviving
//! cold particles.

pub mod attractor;
pub mod config;
pub mod driver;
pub mod interpool;
pub mod pool;
pub mod probe;

pub use attractor::{apply_attraction, Attractor};
pub use config::{
    AttractionConfig, CollisionConfig, ConfigError, FlowProfile, SimConfig, SpawnProfile,
};
pub use driver::{AirflowSim, AttractorId, PoolId};
pub use interpool::resolve_pair;
pub use pool::ParticlePool;
pub use probe::probe_pool;
