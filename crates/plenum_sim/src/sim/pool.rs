//! Fixed-capacity particle pool
//!
//! A pool owns the particle state for one emitter as parallel arrays
//! (struct-of-arrays): the integrate and respawn loops touch each
//! attribute sequentially and never allocate. The particle count is fixed
//! at creation; an expired particle is reinitialized in its slot, so the
//! pool's visual density stays stable without churn.

use crate::scene::{NodeId, Transform};
use crate::sim::config::{CollisionConfig, FlowProfile};
use plenum_core::{Color, Vec3, Xorshift32};

/// Particle pool attached to one emitter node
#[derive(Clone, Debug)]
pub struct ParticlePool {
    emitter: NodeId,
    profile: FlowProfile,
    /// Positions in the emitter's local frame
    positions: Vec<Vec3>,
    /// Cached world positions, refreshed from the emitter transform every
    /// frame; the attractor field and inter-pool resolver read these
    world_positions: Vec<Vec3>,
    /// Velocities in the emitter's local frame
    velocities: Vec<Vec3>,
    /// Frame counters, monotonically increasing between respawns
    lifetimes: Vec<u32>,
    max_lifetimes: Vec<u32>,
    colors: Vec<Color>,
    collided: Vec<bool>,
    /// Respawn count per slot, so renderers and tests can detect reuse
    generations: Vec<u32>,
}

impl ParticlePool {
    /// Allocate a pool and initialize every slot from the profile's spawn
    /// distribution
    pub fn spawn(profile: FlowProfile, emitter: NodeId, rng: &mut Xorshift32) -> Self {
        let count = profile.count;
        let mut pool = Self {
            emitter,
            profile,
            positions: vec![Vec3::ZERO; count],
            world_positions: vec![Vec3::ZERO; count],
            velocities: vec![Vec3::ZERO; count],
            lifetimes: vec![0; count],
            max_lifetimes: vec![0; count],
            colors: vec![Color::WHITE; count],
            collided: vec![false; count],
            generations: vec![0; count],
        };
        for i in 0..count {
            pool.init_slot(i, rng);
        }
        pool
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn emitter(&self) -> NodeId {
        self.emitter
    }

    pub fn profile(&self) -> &FlowProfile {
        &self.profile
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn world_positions(&self) -> &[Vec3] {
        &self.world_positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn lifetimes(&self) -> &[u32] {
        &self.lifetimes
    }

    pub fn max_lifetimes(&self) -> &[u32] {
        &self.max_lifetimes
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn generations(&self) -> &[u32] {
        &self.generations
    }

    pub fn is_collided(&self, index: usize) -> bool {
        self.collided[index]
    }

    /// Add a velocity contribution (local frame), as the attractor field
    /// does once per frame with the accumulated force
    pub fn add_velocity(&mut self, index: usize, dv: Vec3) {
        let v = &mut self.velocities[index];
        v.x += dv.x;
        v.y += dv.y;
        v.z += dv.z;
    }

    /// Advance every particle one frame
    ///
    /// Per slot: age and respawn if expired, advance the position by the
    /// per-axis accelerated velocity, perturb the velocity with
    /// turbulence, and refresh the cached world position from the
    /// emitter's current transform. Collided particles stay put: their
    /// velocity is zero and turbulence is withheld so they remain stopped
    /// until they expire.
    pub fn integrate(&mut self, emitter: &Transform, rng: &mut Xorshift32) {
        let accel = self.profile.accelerations;
        let turbulence = self.profile.turbulence;

        for i in 0..self.positions.len() {
            self.lifetimes[i] += 1;
            if self.lifetimes[i] >= self.max_lifetimes[i] {
                self.init_slot(i, rng);
                self.generations[i] += 1;
            }

            let v = self.velocities[i];
            let p = &mut self.positions[i];
            p.x += v.x * accel.x;
            p.y += v.y * accel.y;
            p.z += v.z * accel.z;

            if !self.collided[i] {
                let v = &mut self.velocities[i];
                v.x += (rng.next_f32() - 0.5) * turbulence.x;
                v.y += (rng.next_f32() - 0.5) * turbulence.y;
                v.z += (rng.next_f32() - 0.5) * turbulence.z;
            }

            self.world_positions[i] = emitter.local_to_world_point(self.positions[i]);
        }
    }

    /// Mark a particle as having struck geometry or another particle
    ///
    /// Stops it dead, flips its visual tag, and shortens its max lifetime
    /// so it expires early. Idempotent: a particle already marked keeps
    /// its tag and remaining lifetime until it respawns.
    pub fn mark_collided(&mut self, index: usize, config: &CollisionConfig) {
        if self.collided[index] {
            return;
        }
        self.collided[index] = true;
        self.colors[index] = config.collided_color;
        self.velocities[index] = Vec3::ZERO;
        let shortened = (self.max_lifetimes[index] as f32 * config.lifetime_factor) as u32;
        self.max_lifetimes[index] = shortened.max(1);
    }

    /// Reinitialize a slot from the spawn distribution
    fn init_slot(&mut self, index: usize, rng: &mut Xorshift32) {
        let spawn = &self.profile.spawn;

        self.positions[index] = Vec3::new(
            spawn.position_base.x + (rng.next_f32() - 0.5) * spawn.position_spread.x,
            spawn.position_base.y + (rng.next_f32() - 0.5) * spawn.position_spread.y,
            spawn.position_base.z + (rng.next_f32() - 0.5) * spawn.position_spread.z,
        );
        self.velocities[index] = Vec3::new(
            spawn.velocity_base.x + (rng.next_f32() - 0.5) * spawn.velocity_spread.x,
            spawn.velocity_base.y + (rng.next_f32() - 0.5) * spawn.velocity_spread.y,
            spawn.velocity_base.z + (rng.next_f32() - 0.5) * spawn.velocity_spread.z,
        );
        // Start the counter at a random phase so the pool never expires in
        // lockstep; lifetime_base <= max lifetime keeps it in range
        self.lifetimes[index] = (rng.next_f32() * spawn.lifetime_base as f32) as u32;
        self.max_lifetimes[index] =
            spawn.lifetime_base + (rng.next_f32() * spawn.lifetime_spread as f32) as u32;
        self.colors[index] = spawn.color;
        self.collided[index] = false;
        self.world_positions[index] = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::sim::config::SpawnProfile;

    fn test_emitter() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let id = scene.add_node(Transform::identity());
        (scene, id)
    }

    /// Profile with no randomness, for exact-arithmetic assertions
    fn deterministic_profile(velocity: Vec3, accelerations: Vec3) -> FlowProfile {
        FlowProfile {
            count: 4,
            spawn: SpawnProfile {
                position_base: Vec3::ZERO,
                position_spread: Vec3::ZERO,
                velocity_base: velocity,
                velocity_spread: Vec3::ZERO,
                color: Color::rgb(1.0, 0.1, 0.1),
                lifetime_base: 1000,
                lifetime_spread: 0,
            },
            accelerations,
            turbulence: Vec3::ZERO,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let (_, emitter) = test_emitter();
        let mut rng = Xorshift32::new(1);
        let pool = ParticlePool::spawn(FlowProfile::rack(), emitter, &mut rng);

        assert_eq!(pool.len(), 250);
        for i in 0..pool.len() {
            let p = pool.positions()[i];
            assert!(p.x.abs() <= 0.25);
            assert!(p.y.abs() <= 1.25);
            assert!((-1.3..=-0.3).contains(&p.z));

            let v = pool.velocities()[i];
            assert!(v.x.abs() <= 0.001);
            assert!((0.001..=0.003).contains(&v.y));
            assert!((-0.021..=-0.001).contains(&v.z));

            assert!(pool.lifetimes()[i] < pool.max_lifetimes()[i]);
            assert!((1000..1500).contains(&pool.max_lifetimes()[i]));
            assert!(!pool.is_collided(i));
        }
    }

    #[test]
    fn test_pool_size_never_changes() {
        let (scene, emitter) = test_emitter();
        let mut rng = Xorshift32::new(2);
        let mut pool = ParticlePool::spawn(FlowProfile::cooler(), emitter, &mut rng);
        let transform = *scene.transform(emitter).unwrap();

        for _ in 0..100 {
            pool.integrate(&transform, &mut rng);
            assert_eq!(pool.len(), 500);
        }
    }

    #[test]
    fn test_per_axis_acceleration() {
        let (scene, emitter) = test_emitter();
        let mut rng = Xorshift32::new(3);
        let profile =
            deterministic_profile(Vec3::new(1.0, 2.0, -1.0), Vec3::new(1.0, 1.2, 0.3));
        let mut pool = ParticlePool::spawn(profile, emitter, &mut rng);
        let transform = *scene.transform(emitter).unwrap();

        pool.integrate(&transform, &mut rng);

        let p = pool.positions()[0];
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 2.4).abs() < 1e-5);
        assert!((p.z - (-0.3)).abs() < 1e-5);
        // World position cache reflects the emitter transform
        assert_eq!(pool.world_positions()[0], p);
    }

    #[test]
    fn test_world_positions_follow_emitter() {
        let mut scene = Scene::new();
        let emitter = scene.add_node(Transform::at(10.0, 0.0, 0.0));
        let mut rng = Xorshift32::new(4);
        let profile = deterministic_profile(Vec3::ZERO, Vec3::ONE);
        let mut pool = ParticlePool::spawn(profile, emitter, &mut rng);

        pool.integrate(scene.transform(emitter).unwrap(), &mut rng);
        assert!((pool.world_positions()[0].x - 10.0).abs() < 1e-5);

        // The emitter gets dragged between ticks
        scene.set_transform(emitter, Transform::at(20.0, 0.0, 0.0));
        pool.integrate(scene.transform(emitter).unwrap(), &mut rng);
        assert!((pool.world_positions()[0].x - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_collided_particle_stays_stopped() {
        let (scene, emitter) = test_emitter();
        let mut rng = Xorshift32::new(5);
        let mut profile = FlowProfile::cooler();
        profile.count = 8;
        let mut pool = ParticlePool::spawn(profile, emitter, &mut rng);
        let transform = *scene.transform(emitter).unwrap();
        let config = CollisionConfig::default();

        // Pick a slot far from expiry so it cannot respawn mid-test
        let slot = (0..pool.len())
            .find(|&i| pool.lifetimes()[i] < 500)
            .unwrap();
        pool.mark_collided(slot, &config);
        assert_eq!(pool.velocities()[slot], Vec3::ZERO);
        let frozen = pool.positions()[slot];

        // Turbulence is withheld from collided particles; it must not creep
        for _ in 0..10 {
            pool.integrate(&transform, &mut rng);
        }
        assert_eq!(pool.velocities()[slot], Vec3::ZERO);
        assert_eq!(pool.positions()[slot], frozen);
    }

    #[test]
    fn test_mark_collided_is_idempotent() {
        let (_, emitter) = test_emitter();
        let mut rng = Xorshift32::new(6);
        let mut pool = ParticlePool::spawn(FlowProfile::rack(), emitter, &mut rng);
        let config = CollisionConfig::default();

        pool.mark_collided(0, &config);
        let max_after_first = pool.max_lifetimes()[0];
        pool.mark_collided(0, &config);
        // A second mark must not shorten the lifetime again
        assert_eq!(pool.max_lifetimes()[0], max_after_first);
        assert!(pool.is_collided(0));
    }

    #[test]
    fn test_respawn_clears_collision() {
        let (scene, emitter) = test_emitter();
        let mut rng = Xorshift32::new(7);
        let mut profile = FlowProfile::rack();
        profile.count = 1;
        profile.spawn.lifetime_base = 2;
        profile.spawn.lifetime_spread = 0;
        let mut pool = ParticlePool::spawn(profile, emitter, &mut rng);
        let transform = *scene.transform(emitter).unwrap();
        let config = CollisionConfig::default();

        pool.mark_collided(0, &config);
        for _ in 0..4 {
            pool.integrate(&transform, &mut rng);
        }
        assert!(!pool.is_collided(0));
        assert!(pool.generations()[0] >= 1);
        assert_eq!(pool.colors()[0], profile.spawn.color);
    }
}
