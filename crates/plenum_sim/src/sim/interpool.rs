//! Hot/cold inter-pool particle collisions
//!
//! Hot exhaust particles that meet cold supply air annihilate in pairs:
//! both particles are tagged and expire early. The test is brute-force
//! over world positions, O(rack particles x cooler particles) per pool
//! pair, which is acceptable at pool sizes in the low hundreds.
//!
//! Neither pool type knows about the other; the driver owns both
//! collections and routes every (rack, cooler) pair through here.

use crate::sim::config::CollisionConfig;
use crate::sim::pool::ParticlePool;

/// Resolve collisions between one rack pool and one cooler pool
///
/// First match wins: a rack particle collides with at most one cooler
/// particle per frame, and particles that are already collided do not
/// annihilate again.
pub fn resolve_pair(rack: &mut ParticlePool, cooler: &mut ParticlePool, config: &CollisionConfig) {
    for rack_index in 0..rack.len() {
        if rack.is_collided(rack_index) {
            continue;
        }
        let rack_position = rack.world_positions()[rack_index];

        for cooler_index in 0..cooler.len() {
            if cooler.is_collided(cooler_index) {
                continue;
            }
            let distance = rack_position.distance_to(cooler.world_positions()[cooler_index]);
            if distance < config.radius {
                rack.mark_collided(rack_index, config);
                cooler.mark_collided(cooler_index, config);
                // Stop testing this rack particle against further cooler
                // particles
                break;
            }
        }
    }
}
