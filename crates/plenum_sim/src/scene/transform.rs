//! Local/world transform for scene nodes

use crate::math::{Quat, Vec3};

/// Position, rotation, and scale of a scene node
///
/// Emitters (racks, coolers) own one of these; particle pools keep
/// positions in emitter-local space and convert through the emitter's
/// transform every frame, so a node being dragged between ticks is
/// picked up automatically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Rotation as a unit quaternion
    pub rotation: Quat,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform at the origin
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create with position
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Default::default()
        }
    }

    /// Set rotation from Euler angles (radians)
    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Quat::from_euler(x, y, z);
        self
    }

    /// Set per-axis scale
    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vec3::new(x, y, z);
        self
    }

    /// Map a point from this node's local space into world space
    pub fn local_to_world_point(&self, p: Vec3) -> Vec3 {
        let scaled = Vec3::new(p.x * self.scale.x, p.y * self.scale.y, p.z * self.scale.z);
        let rotated = self.rotation.rotate_vec3(scaled);
        Vec3::new(
            rotated.x + self.position.x,
            rotated.y + self.position.y,
            rotated.z + self.position.z,
        )
    }

    /// Map a point from world space into this node's local space
    pub fn world_to_local_point(&self, p: Vec3) -> Vec3 {
        let translated = Vec3::new(
            p.x - self.position.x,
            p.y - self.position.y,
            p.z - self.position.z,
        );
        let rotated = self.rotation.conjugate().rotate_vec3(translated);
        Vec3::new(
            rotated.x / self.scale.x,
            rotated.y / self.scale.y,
            rotated.z / self.scale.z,
        )
    }

    /// Rotate a direction from local space into world space (ignores
    /// translation and scale)
    pub fn local_to_world_direction(&self, d: Vec3) -> Vec3 {
        self.rotation.rotate_vec3(d)
    }
}
