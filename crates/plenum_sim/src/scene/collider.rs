//! Collidable shapes for scene nodes

use crate::math::{BoundingBox, BoundingSphere, Vec3};
use crate::scene::Transform;

/// Shape a particle ray can strike
///
/// Walls and placed equipment are boxes in their node's local space; the
/// floor is an infinite plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColliderShape {
    /// Infinite plane: points `p` with `p . normal == offset`
    Plane {
        /// Plane normal (must be normalized)
        normal: Vec3,
        /// Signed distance of the plane from the origin along the normal
        offset: f32,
    },
    /// Box in the node's local space, positioned by the node transform
    Box(BoundingBox),
}

impl ColliderShape {
    /// Horizontal floor plane at the given height
    pub fn floor(height: f32) -> Self {
        Self::Plane {
            normal: Vec3::UP,
            offset: height,
        }
    }

    /// Local-space box centered on the node origin
    pub fn centered_box(half_extents: Vec3) -> Self {
        Self::Box(BoundingBox::from_center_half_extents(
            Vec3::ZERO,
            half_extents,
        ))
    }

    /// World-space distance along the ray to this shape, or `None`
    ///
    /// `direction` must be normalized. Box shapes are intersected in the
    /// node's local space and the hit point mapped back to world space, so
    /// rotated and scaled nodes are handled uniformly.
    pub fn intersect_ray(&self, transform: &Transform, origin: Vec3, direction: Vec3) -> Option<f32> {
        match self {
            ColliderShape::Plane { normal, offset } => {
                let denom = direction.dot(*normal);
                if denom.abs() < 1e-9 {
                    return None;
                }
                let t = (offset - origin.dot(*normal)) / denom;
                (t >= 0.0).then_some(t)
            }
            ColliderShape::Box(bbox) => {
                let local_origin = transform.world_to_local_point(origin);
                // Directions scale inversely with the node scale; length is
                // recovered from the world-space hit point below
                let rotated = transform.rotation.conjugate().rotate_vec3(direction);
                let local_dir = Vec3::new(
                    rotated.x / transform.scale.x,
                    rotated.y / transform.scale.y,
                    rotated.z / transform.scale.z,
                );
                let t = bbox.intersect_ray(local_origin, local_dir)?;
                let local_hit = Vec3::new(
                    local_origin.x + local_dir.x * t,
                    local_origin.y + local_dir.y * t,
                    local_origin.z + local_dir.z * t,
                );
                Some(origin.distance_to(transform.local_to_world_point(local_hit)))
            }
        }
    }

    /// Conservative world-space bounding sphere, used to cull candidates
    /// before raycasting; `None` for unbounded shapes
    pub fn world_bounding_sphere(&self, transform: &Transform) -> Option<BoundingSphere> {
        match self {
            ColliderShape::Plane { .. } => None,
            ColliderShape::Box(bbox) => {
                let local = BoundingSphere::from_box(bbox);
                let max_scale = transform
                    .scale
                    .x
                    .abs()
                    .max(transform.scale.y.abs())
                    .max(transform.scale.z.abs());
                Some(BoundingSphere::new(
                    transform.local_to_world_point(local.center),
                    local.radius * max_scale,
                ))
            }
        }
    }
}
