//! Screen rays and analytic ray/plane intersection.

use bevy::math::{Vec2, Vec3};

use crate::constants::RAY_UNPROJECT_DEPTH;

use super::CameraPose;

/// A world-space ray used for screen-to-world queries.
///
/// The direction is stored as given. Consumers normalize it on use, so a
/// caller may build a ray from any non-zero direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Build the ray passing through a screen point.
    ///
    /// The origin is the camera translation. The direction points from the
    /// origin toward the screen point unprojected at the far-plane proxy depth.
    /// Returns `None` when the unprojection is degenerate.
    pub fn from_screen(camera: &CameraPose, screen: Vec2) -> Option<Self> {
        let origin = camera.translation();
        let far = camera.unproject(screen, RAY_UNPROJECT_DEPTH)?;
        let direction = (far - origin).try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Unit-length direction, or `None` for a zero direction
    pub fn unit_direction(&self) -> Option<Vec3> {
        self.direction.try_normalize()
    }

    /// Intersect with the infinite horizontal plane `y = plane_y`.
    ///
    /// The direction is normalized before solving, so the parameter is a true
    /// distance along the ray. A plane behind the origin never intersects.
    /// A ray parallel to the plane intersects only when its origin lies on it,
    /// in which case the origin itself is returned.
    pub fn intersect_horizontal_plane(&self, plane_y: f32) -> Option<Vec3> {
        let direction = self.unit_direction()?;
        if direction.y == 0.0 {
            return (self.origin.y == plane_y).then_some(self.origin);
        }

        let t = (plane_y - self.origin.y) / direction.y;
        if t < 0.0 {
            return None;
        }

        Some(self.origin + direction * t)
    }

    /// Distance from the ray origin to the slab intersection with an
    /// axis-aligned box, if the ray enters it in front of the origin.
    pub fn intersect_aabb(&self, min: Vec3, max: Vec3) -> Option<f32> {
        let direction = self.unit_direction()?;
        let inv = direction.recip();

        let t1 = (min - self.origin) * inv;
        let t2 = (max - self.origin) * inv;
        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();

        if t_far < 0.0 || t_near > t_far || t_near.is_nan() || t_far.is_nan() {
            return None;
        }

        Some(t_near.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_plane_intersection_straight_down() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, -3.0), Vec3::NEG_Y);
        let hit = ray.intersect_horizontal_plane(0.0).unwrap();
        assert_vec_near(hit, Vec3::new(1.0, 0.0, -3.0));
    }

    #[test]
    fn test_plane_intersection_normalizes_direction() {
        // A long direction vector must give the same point as a unit one
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -10.0, -10.0));
        let hit = ray.intersect_horizontal_plane(0.0).unwrap();
        assert_vec_near(hit, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_plane_behind_origin_is_none() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(ray.intersect_horizontal_plane(0.0).is_none());
    }

    #[test]
    fn test_parallel_ray_off_plane_is_none() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z);
        assert!(ray.intersect_horizontal_plane(0.0).is_none());
    }

    #[test]
    fn test_parallel_ray_on_plane_returns_origin() {
        let origin = Vec3::new(2.0, 0.5, 1.0);
        let ray = Ray::new(origin, Vec3::X);
        assert_eq!(ray.intersect_horizontal_plane(0.5), Some(origin));
    }

    #[test]
    fn test_zero_direction_never_intersects() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(ray.intersect_horizontal_plane(0.0).is_none());
        assert!(ray.intersect_aabb(Vec3::splat(-1.0), Vec3::ONE).is_none());
    }

    #[test]
    fn test_aabb_hit_distance() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = ray
            .intersect_aabb(Vec3::new(-0.5, -0.5, -3.0), Vec3::new(0.5, 0.5, -2.0))
            .unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_aabb_behind_is_none() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(ray
            .intersect_aabb(Vec3::new(-0.5, -0.5, -3.0), Vec3::new(0.5, 0.5, -2.0))
            .is_none());
    }

    #[test]
    fn test_aabb_origin_inside_is_zero() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.intersect_aabb(Vec3::splat(-1.0), Vec3::ONE), Some(0.0));
    }

    #[test]
    fn test_aabb_miss_to_the_side() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(ray
            .intersect_aabb(Vec3::new(-0.5, -0.5, -3.0), Vec3::new(0.5, 0.5, -2.0))
            .is_none());
    }
}
