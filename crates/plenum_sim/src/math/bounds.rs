//! Bounding volumes for collision and candidate culling

use plenum_core::Vec3;

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Create from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create from center and half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: Vec3::new(
                center.x - half_extents.x,
                center.y - half_extents.y,
                center.z - half_extents.z,
            ),
            max: Vec3::new(
                center.x + half_extents.x,
                center.y + half_extents.y,
                center.z + half_extents.z,
            ),
        }
    }

    /// Get the center point
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Get half-extents
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(
            (self.max.x - self.min.x) * 0.5,
            (self.max.y - self.min.y) * 0.5,
            (self.max.z - self.min.z) * 0.5,
        )
    }

    /// Check if a point is inside
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Slab test: distance along the ray to the box, or `None` for a miss
    ///
    /// `direction` need not be normalized; the returned `t` is in units of
    /// `direction`. A ray starting inside the box hits at `t = 0`.
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        let origins = [origin.x, origin.y, origin.z];
        let dirs = [direction.x, direction.y, direction.z];
        let mins = [self.min.x, self.min.y, self.min.z];
        let maxs = [self.max.x, self.max.y, self.max.z];

        for axis in 0..3 {
            if dirs[axis].abs() < 1e-9 {
                // Parallel to this slab: miss unless origin is inside it
                if origins[axis] < mins[axis] || origins[axis] > maxs[axis] {
                    return None;
                }
            } else {
                let inv = 1.0 / dirs[axis];
                let mut t0 = (mins[axis] - origins[axis]) * inv;
                let mut t1 = (maxs[axis] - origins[axis]) * inv;
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                t_min = t_min.max(t0);
                t_max = t_max.min(t1);
                if t_min > t_max {
                    return None;
                }
            }
        }

        if t_max < 0.0 {
            return None;
        }
        Some(t_min.max(0.0))
    }
}

/// Bounding sphere
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Create from a bounding box
    pub fn from_box(bbox: &BoundingBox) -> Self {
        let center = bbox.center();
        let radius = bbox.half_extents().length();
        Self { center, radius }
    }

    /// Conservative distance from a point to the sphere surface
    ///
    /// Negative when the point is inside the sphere.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.center.distance_to(point) - self.radius
    }
}
