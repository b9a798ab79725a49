//! Intake attractor field
//!
//! Every rack carries a finite rectangular intake panel. Each frame the
//! panels exert a distance- and side-dependent force on every cooler
//! particle in the scene: particles in front of the attracting face are
//! pulled in, particles behind it are pushed away. Forces from all panels
//! are accumulated in world space and applied to the particle's velocity
//! once, after rotating into the cooler's local frame.

use crate::scene::{NodeId, Scene, Transform};
use crate::sim::config::AttractionConfig;
use crate::sim::pool::ParticlePool;
use plenum_core::Vec3;
use smallvec::SmallVec;

/// Finite rectangular intake panel, rigidly attached to a rack
///
/// The panel sits on the rack's local XY plane, centered on the rack
/// origin; the attracting face points along the configured local normal.
#[derive(Clone, Copy, Debug)]
pub struct Attractor {
    rack: NodeId,
    half_width: f32,
    half_height: f32,
    local_normal: Vec3,
}

impl Attractor {
    pub fn new(rack: NodeId, config: &AttractionConfig) -> Self {
        Self {
            rack,
            half_width: config.panel_width * 0.5,
            half_height: config.panel_height * 0.5,
            local_normal: config.local_normal,
        }
    }

    pub fn rack(&self) -> NodeId {
        self.rack
    }

    /// Closest point on the panel rectangle to a world-space point
    ///
    /// The point is clamped inside the rectangle bounds in the rack's
    /// local frame and mapped back to world space.
    pub fn closest_point(&self, rack: &Transform, world_point: Vec3) -> Vec3 {
        let local = rack.world_to_local_point(world_point);
        let clamped = Vec3::new(
            local.x.clamp(-self.half_width, self.half_width),
            local.y.clamp(-self.half_height, self.half_height),
            0.0,
        );
        rack.local_to_world_point(clamped)
    }

    /// Attracting-face normal in world space
    pub fn world_normal(&self, rack: &Transform) -> Vec3 {
        rack.local_to_world_direction(self.local_normal)
    }
}

/// Panel state snapshotted once per frame, so the inner particle loop
/// never re-derives transforms
struct PanelFrame {
    attractor: Attractor,
    rack_transform: Transform,
    world_normal: Vec3,
}

/// Accumulate and apply attractor forces to every cooler pool
///
/// Collided particles are skipped: a stopped particle stays stopped until
/// it respawns.
pub fn apply_attraction<'a, 'b>(
    scene: &Scene,
    pools: impl Iterator<Item = &'a mut ParticlePool>,
    attractors: impl Iterator<Item = &'b Attractor>,
    config: &AttractionConfig,
) {
    let panels: SmallVec<[PanelFrame; 8]> = attractors
        .map(|attractor| {
            let rack_transform = *scene
                .transform(attractor.rack)
                .expect("attractor references a removed rack");
            PanelFrame {
                attractor: *attractor,
                rack_transform,
                world_normal: attractor.world_normal(&rack_transform),
            }
        })
        .collect();

    if panels.is_empty() {
        return;
    }

    for pool in pools {
        let cooler = scene
            .transform(pool.emitter())
            .expect("pool references a removed emitter");
        // World-space force is converted into the cooler's local frame
        // before being added to local-space velocity
        let inverse_rotation = cooler.rotation.conjugate();

        for i in 0..pool.len() {
            if pool.is_collided(i) {
                continue;
            }

            let position = pool.world_positions()[i];
            let total = accumulate_force(position, &panels, config);
            if total == Vec3::ZERO {
                continue;
            }
            pool.add_velocity(i, inverse_rotation.rotate_vec3(total));
        }
    }
}

/// Sum the force from every panel at one world position
fn accumulate_force(position: Vec3, panels: &[PanelFrame], config: &AttractionConfig) -> Vec3 {
    let mut total = Vec3::ZERO;

    for panel in panels {
        let closest = panel
            .attractor
            .closest_point(&panel.rack_transform, position);
        let offset = Vec3::new(
            closest.x - position.x,
            closest.y - position.y,
            closest.z - position.z,
        );
        let distance = offset.length();

        if distance > config.cutoff_distance {
            continue;
        }
        if distance <= config.near_threshold {
            continue;
        }

        let direction = Vec3::new(
            offset.x / distance,
            offset.y / distance,
            offset.z / distance,
        );

        // Inverse-square falloff, floored and capped
        let safe_distance = distance.max(config.min_distance);
        let magnitude =
            (config.force_strength / (safe_distance * safe_distance)).min(config.max_force);

        // In front of the attracting face the direction to the panel
        // opposes the normal: pull in. Behind it: push away.
        let signed = if direction.dot(panel.world_normal) < 0.0 {
            magnitude
        } else {
            -magnitude
        };

        total.x += direction.x * signed;
        total.y += direction.y * signed;
        total.z += direction.z * signed;
    }

    total
}
