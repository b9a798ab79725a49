//! Geometry collision probe
//!
//! Once per particle per frame, a ray is cast from the particle's world
//! position along its velocity direction against every collidable node
//! except the pool's own emitter. A nearest hit inside the collision
//! radius stops the particle. This pass is the dominant cost of the
//! simulation, O(particles x collidables) per pool; the optional
//! `cull_distance` prunes far candidates before intersecting.

use crate::scene::{raycast, Ray, RayFilter, Scene};
use crate::sim::config::CollisionConfig;
use crate::sim::pool::ParticlePool;

/// Probe every particle of a pool against the scene's collidable set
pub fn probe_pool(scene: &Scene, pool: &mut ParticlePool, config: &CollisionConfig) {
    let mut filter = RayFilter::excluding(pool.emitter());
    filter.cull_distance = config.cull_distance;

    for i in 0..pool.len() {
        // A stopped particle has no direction to probe along; skipping it
        // also keeps the collided tag from flickering
        if pool.is_collided(i) {
            continue;
        }

        let velocity = pool.velocities()[i];
        if velocity.length_squared() < 1e-12 {
            continue;
        }

        let ray = Ray::new(pool.world_positions()[i], velocity.normalize());
        if let Some(hit) = raycast(scene, ray, filter) {
            if hit.distance < config.radius {
                pool.mark_collided(i, config);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ColliderShape, Transform};
    use crate::sim::config::{FlowProfile, SpawnProfile};
    use plenum_core::{Color, Vec3, Xorshift32};

    /// Single particle moving along +X from the emitter origin
    fn single_particle_profile() -> FlowProfile {
        FlowProfile {
            count: 1,
            spawn: SpawnProfile {
                position_base: Vec3::ZERO,
                position_spread: Vec3::ZERO,
                velocity_base: Vec3::new(0.01, 0.0, 0.0),
                velocity_spread: Vec3::ZERO,
                color: Color::rgb(0.1, 0.5, 1.0),
                lifetime_base: 1000,
                lifetime_spread: 0,
            },
            accelerations: Vec3::ONE,
            turbulence: Vec3::ZERO,
        }
    }

    #[test]
    fn test_empty_collidable_set_is_no_hit() {
        let mut scene = Scene::new();
        let emitter = scene.add_node(Transform::identity());
        let mut rng = Xorshift32::new(1);
        let mut pool = ParticlePool::spawn(single_particle_profile(), emitter, &mut rng);
        pool.integrate(scene.transform(emitter).unwrap(), &mut rng);

        probe_pool(&scene, &mut pool, &CollisionConfig::default());
        assert!(!pool.is_collided(0));
    }

    #[test]
    fn test_nearby_wall_stops_particle() {
        let mut scene = Scene::new();
        let emitter = scene.add_node(Transform::identity());
        // Wall face 0.05 units in front of the spawn point
        scene.add_collidable(
            Transform::at(1.05, 0.0, 0.0),
            ColliderShape::centered_box(Vec3::new(1.0, 2.0, 2.0)),
        );

        let mut rng = Xorshift32::new(2);
        let mut pool = ParticlePool::spawn(single_particle_profile(), emitter, &mut rng);
        pool.integrate(scene.transform(emitter).unwrap(), &mut rng);

        probe_pool(&scene, &mut pool, &CollisionConfig::default());
        assert!(pool.is_collided(0));
        assert_eq!(pool.velocities()[0], Vec3::ZERO);
        assert_eq!(pool.colors()[0], CollisionConfig::default().collided_color);
    }

    #[test]
    fn test_distant_wall_is_ignored() {
        let mut scene = Scene::new();
        let emitter = scene.add_node(Transform::identity());
        scene.add_collidable(
            Transform::at(6.0, 0.0, 0.0),
            ColliderShape::centered_box(Vec3::new(1.0, 2.0, 2.0)),
        );

        let mut rng = Xorshift32::new(3);
        let mut pool = ParticlePool::spawn(single_particle_profile(), emitter, &mut rng);
        pool.integrate(scene.transform(emitter).unwrap(), &mut rng);

        // The ray hits the wall, but well outside the collision radius
        probe_pool(&scene, &mut pool, &CollisionConfig::default());
        assert!(!pool.is_collided(0));
    }

    #[test]
    fn test_own_emitter_never_self_collides() {
        let mut scene = Scene::new();
        // The emitter itself is collidable and encloses its own particles
        let emitter = scene.add_collidable(
            Transform::identity(),
            ColliderShape::centered_box(Vec3::splat(3.0)),
        );

        let mut rng = Xorshift32::new(4);
        let mut pool = ParticlePool::spawn(single_particle_profile(), emitter, &mut rng);
        pool.integrate(scene.transform(emitter).unwrap(), &mut rng);

        probe_pool(&scene, &mut pool, &CollisionConfig::default());
        assert!(!pool.is_collided(0));
    }

    #[test]
    fn test_collided_particle_is_skipped() {
        let mut scene = Scene::new();
        let emitter = scene.add_node(Transform::identity());
        scene.add_collidable(
            Transform::at(1.05, 0.0, 0.0),
            ColliderShape::centered_box(Vec3::new(1.0, 2.0, 2.0)),
        );

        let mut rng = Xorshift32::new(5);
        let config = CollisionConfig::default();
        let mut pool = ParticlePool::spawn(single_particle_profile(), emitter, &mut rng);
        pool.integrate(scene.transform(emitter).unwrap(), &mut rng);

        probe_pool(&scene, &mut pool, &config);
        assert!(pool.is_collided(0));
        let max_after = pool.max_lifetimes()[0];

        // Re-probing must not flicker the tag or shorten the lifetime again
        probe_pool(&scene, &mut pool, &config);
        assert!(pool.is_collided(0));
        assert_eq!(pool.max_lifetimes()[0], max_after);
    }
}
