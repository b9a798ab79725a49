//! Simulation configuration
//!
//! Every tuned constant of the airflow model lives here. The defaults are
//! the empirically calibrated values the visual output was tuned against;
//! they are configuration, not law, and can be overridden from JSON.

use plenum_core::{Color, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading/validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid simulation config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid simulation config: {0}")]
    Invalid(String),
}

/// Randomized initial state of a freshly spawned particle
///
/// Each axis draws uniformly: `base + (r - 0.5) * spread` with `r` in
/// `[0, 1)`. Max lifetime is `lifetime_base + r * lifetime_spread` frames;
/// the initial counter starts at `r * lifetime_base` so a pool's particles
/// expire out of phase instead of pulsing together.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SpawnProfile {
    pub position_base: Vec3,
    pub position_spread: Vec3,
    pub velocity_base: Vec3,
    pub velocity_spread: Vec3,
    /// Visual tag of an un-collided particle
    pub color: Color,
    pub lifetime_base: u32,
    pub lifetime_spread: u32,
}

/// Per-pool update profile: spawn distribution plus the per-axis drift
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FlowProfile {
    /// Fixed particle count, set at pool creation
    pub count: usize,
    pub spawn: SpawnProfile,
    /// Per-axis velocity multipliers applied to the position advance;
    /// deliberately not a uniform scalar, they model directional drift
    pub accelerations: Vec3,
    /// Per-axis magnitude of the random velocity perturbation added each
    /// frame
    pub turbulence: Vec3,
}

impl FlowProfile {
    /// Hot exhaust from an equipment rack
    ///
    /// Slow sideways spread, hot air amplified upward, main flow pushed
    /// backward out of the rack and damped by friction.
    pub fn rack() -> Self {
        Self {
            count: 250,
            spawn: SpawnProfile {
                position_base: Vec3::new(0.0, 0.0, -0.8),
                position_spread: Vec3::new(0.5, 2.5, -1.0),
                velocity_base: Vec3::new(0.0, 0.002, -0.011),
                velocity_spread: Vec3::new(0.002, 0.002, -0.02),
                color: Color::rgb(1.0, 0.1, 0.1),
                lifetime_base: 1000,
                lifetime_spread: 500,
            },
            accelerations: Vec3::new(1.0, 1.2, 0.3),
            turbulence: Vec3::new(1e-4, 1e-4, 1e-4),
        }
    }

    /// Cold supply air from a cooler
    ///
    /// Main flow along +X damped by friction, sink toward the floor
    /// amplified, lateral spread constant.
    pub fn cooler() -> Self {
        Self {
            count: 500,
            spawn: SpawnProfile {
                position_base: Vec3::new(0.0, 20.0, 0.0),
                position_spread: Vec3::new(0.0, 0.2, 40.0),
                velocity_base: Vec3::new(1.0, -0.15, 0.0),
                velocity_spread: Vec3::new(2.0, -0.1, 0.02),
                color: Color::rgb(0.1, 0.5, 1.0),
                lifetime_base: 1000,
                lifetime_spread: 500,
            },
            accelerations: Vec3::new(0.5, 1.5, 1.0),
            turbulence: Vec3::new(0.001, 0.01, 0.02),
        }
    }
}

/// Geometry and inter-particle collision tuning
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Proximity threshold below which a particle has struck something
    pub radius: f32,
    /// Max-lifetime multiplier applied on collision, so struck particles
    /// expire early instead of popping out
    pub lifetime_factor: f32,
    /// Visual tag of a collided particle
    pub collided_color: Color,
    /// Skip colliders farther than this from the particle before
    /// raycasting; `None` probes everything
    pub cull_distance: Option<f32>,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            radius: 0.1,
            lifetime_factor: 0.9,
            collided_color: Color::rgb(1.0, 0.5, 0.0),
            cull_distance: None,
        }
    }
}

/// Attractor force-field tuning
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AttractionConfig {
    /// Numerator of the inverse-square force law
    pub force_strength: f32,
    /// Distance floor in the force law, keeps the magnitude bounded near
    /// the panel
    pub min_distance: f32,
    /// Hard cap on the per-attractor force magnitude
    pub max_force: f32,
    /// Attractors beyond this distance contribute nothing
    pub cutoff_distance: f32,
    /// Below this distance the pair is skipped outright, a zero-length
    /// offset cannot be normalized
    pub near_threshold: f32,
    /// Intake panel width (local X)
    pub panel_width: f32,
    /// Intake panel height (local Y)
    pub panel_height: f32,
    /// Attracting face normal in the rack's local space
    pub local_normal: Vec3,
}

impl Default for AttractionConfig {
    fn default() -> Self {
        Self {
            force_strength: 0.001,
            min_distance: 0.5,
            max_force: 0.01,
            cutoff_distance: 10.0,
            near_threshold: 0.01,
            panel_width: 1.0,
            panel_height: 3.0,
            local_normal: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// Complete simulation configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub rack: FlowProfile,
    pub cooler: FlowProfile,
    pub collision: CollisionConfig,
    pub attraction: AttractionConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rack: FlowProfile::rack(),
            cooler: FlowProfile::cooler(),
            collision: CollisionConfig::default(),
            attraction: AttractionConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, profile) in [("rack", &self.rack), ("cooler", &self.cooler)] {
            if profile.count == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} particle count must be non-zero"
                )));
            }
            if profile.spawn.lifetime_base == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} lifetime_base must be non-zero"
                )));
            }
        }
        if self.collision.radius <= 0.0 {
            return Err(ConfigError::Invalid(
                "collision radius must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.collision.lifetime_factor)
            || self.collision.lifetime_factor == 0.0
        {
            return Err(ConfigError::Invalid(
                "collision lifetime_factor must be in (0, 1]".into(),
            ));
        }
        if self.attraction.near_threshold <= 0.0 || self.attraction.min_distance <= 0.0 {
            return Err(ConfigError::Invalid(
                "attraction distance thresholds must be positive".into(),
            ));
        }
        if self.attraction.panel_width <= 0.0 || self.attraction.panel_height <= 0.0 {
            return Err(ConfigError::Invalid(
                "attractor panel dimensions must be positive".into(),
            ));
        }
        Ok(())
    }
}
