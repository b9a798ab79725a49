//! Ray queries against the collidable set

use crate::scene::{NodeId, Scene};
use plenum_core::Vec3;

/// Ray for collision queries
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// Ray origin in world space
    pub origin: Vec3,
    /// Ray direction (must be normalized)
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }
}

/// Nearest-hit result of a ray query
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    /// Node that was hit
    pub node: NodeId,
    /// Distance from the ray origin, in world units
    pub distance: f32,
}

/// Filter for ray queries
#[derive(Clone, Copy, Debug, Default)]
pub struct RayFilter {
    /// Node to skip (a pool's own emitter never collides its particles)
    pub exclude: Option<NodeId>,
    /// Skip colliders whose bounding sphere is farther than this from the
    /// ray origin before intersecting
    pub cull_distance: Option<f32>,
}

impl RayFilter {
    pub fn excluding(node: NodeId) -> Self {
        Self {
            exclude: Some(node),
            cull_distance: None,
        }
    }

    pub fn with_cull_distance(mut self, distance: f32) -> Self {
        self.cull_distance = Some(distance);
        self
    }
}

/// Find the nearest collider hit by the ray
///
/// An empty collidable set is a normal outcome and returns `None`.
pub fn raycast(scene: &Scene, ray: Ray, filter: RayFilter) -> Option<RayHit> {
    let mut nearest: Option<RayHit> = None;

    for (id, node) in scene.collidables() {
        if filter.exclude == Some(id) {
            continue;
        }
        let shape = match node.collider {
            Some(shape) => shape,
            None => continue,
        };

        if let Some(cull) = filter.cull_distance {
            if let Some(sphere) = shape.world_bounding_sphere(&node.transform) {
                if sphere.distance_to_point(ray.origin) > cull {
                    continue;
                }
            }
        }

        if let Some(distance) = shape.intersect_ray(&node.transform, ray.origin, ray.direction) {
            match nearest {
                Some(hit) if hit.distance <= distance => {}
                _ => nearest = Some(RayHit { node: id, distance }),
            }
        }
    }

    nearest
}
