//! Bounding-box hit testing for placed objects.

use bevy::math::{Quat, Vec3};

use super::Ray;

/// Local-space box centered on an object's origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub half_extents: Vec3,
}

impl BoundingBox {
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            half_extents: half_extents.abs(),
        }
    }

    /// Distance along the ray to the box placed at `center` with `rotation`.
    ///
    /// The ray is moved into the box's local frame so the test stays an
    /// axis-aligned slab test. Rotation preserves length, so the returned
    /// distance is valid in world space.
    pub fn ray_distance(&self, ray: &Ray, center: Vec3, rotation: Quat) -> Option<f32> {
        let inverse = rotation.inverse();
        let local = Ray::new(inverse * (ray.origin - center), inverse * ray.direction);
        local.intersect_aabb(-self.half_extents, self.half_extents)
    }
}
