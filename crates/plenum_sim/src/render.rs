//! GPU-ready instance extraction
//!
//! The simulation itself never talks to a GPU; this module flattens pool
//! state into a tightly packed, `Pod` instance layout a point renderer
//! can upload verbatim.

use crate::sim::{AirflowSim, ParticlePool};
use bytemuck::{Pod, Zeroable};

/// Default rendered point size, in world units
pub const DEFAULT_POINT_SIZE: f32 = 0.05;

/// One particle as a point-sprite instance
///
/// `position_size` packs the world position in xyz and the point size in
/// w, 32 bytes per instance.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position_size: [f32; 4],
    pub color: [f32; 4],
}

/// Append one pool's particles to an instance buffer
pub fn write_pool_instances(pool: &ParticlePool, size: f32, out: &mut Vec<ParticleInstance>) {
    out.reserve(pool.len());
    for i in 0..pool.len() {
        let position = pool.world_positions()[i];
        let color = pool.colors()[i];
        out.push(ParticleInstance {
            position_size: [position.x, position.y, position.z, size],
            color: [color.r, color.g, color.b, color.a],
        });
    }
}

/// Flatten every pool in the simulation into one instance buffer
///
/// Rack pools come first, then cooler pools; the buffer is cleared before
/// writing so it can be reused across frames.
pub fn write_instances(sim: &AirflowSim, out: &mut Vec<ParticleInstance>) {
    out.clear();
    for pool in sim.rack_pools() {
        write_pool_instances(pool, DEFAULT_POINT_SIZE, out);
    }
    for pool in sim.cooler_pools() {
        write_pool_instances(pool, DEFAULT_POINT_SIZE, out);
    }
}
