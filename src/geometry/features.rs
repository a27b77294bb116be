//! Nearest-feature search over the sparse tracking point cloud.
//!
//! Two query modes are offered:
//! - [`FeaturePointMatcher::search`]: cone and distance filtered, closest first
//! - [`FeaturePointMatcher::closest`]: unrestricted, minimal perpendicular miss

use std::cmp::Ordering;

use bevy::math::Vec3;

use super::Ray;

/// A feature point matched against a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureHit {
    /// Foot of the perpendicular from the feature onto the ray
    pub position: Vec3,
    /// Distance from the ray origin to `position`
    pub distance_to_ray_origin: f32,
    /// The raw cloud point
    pub feature: Vec3,
    /// Perpendicular distance between the feature and the ray
    pub miss_distance: f32,
}

impl FeatureHit {
    /// Project `feature` onto the ray. `direction` must be unit length.
    fn project(feature: Vec3, origin: Vec3, direction: Vec3) -> Self {
        let origin_to_feature = feature - origin;
        let position = origin + direction * direction.dot(origin_to_feature);
        Self {
            position,
            distance_to_ray_origin: (position - origin).length(),
            feature,
            miss_distance: origin_to_feature.cross(direction).length(),
        }
    }
}

/// Parameters for a filtered feature search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeSearch {
    /// Full opening angle of the cone around the ray, in degrees (capped at 360)
    pub cone_angle_degrees: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Number of closest results to keep
    pub max_results: usize,
}

impl Default for ConeSearch {
    fn default() -> Self {
        Self {
            cone_angle_degrees: 360.0,
            min_distance: 0.0,
            max_distance: f32::MAX,
            max_results: 1,
        }
    }
}

impl ConeSearch {
    fn half_angle_radians(&self) -> f32 {
        (self.cone_angle_degrees.min(360.0) / 2.0).to_radians()
    }
}

/// Borrowed view over a frame's feature points
#[derive(Debug, Clone, Copy)]
pub struct FeaturePointMatcher<'a> {
    points: &'a [Vec3],
}

impl<'a> FeaturePointMatcher<'a> {
    pub fn new(points: &'a [Vec3]) -> Self {
        Self { points }
    }

    /// Features inside the cone and distance range, closest to the ray origin first.
    ///
    /// At most `max_results` hits are returned and they are always the closest
    /// ones. The sort is stable, so equal distances keep cloud order.
    pub fn search(&self, ray: &Ray, params: &ConeSearch) -> Vec<FeatureHit> {
        let Some(direction) = ray.unit_direction() else {
            return Vec::new();
        };
        let max_angle = params.half_angle_radians();

        let mut hits: Vec<FeatureHit> = self
            .points
            .iter()
            .filter_map(|&feature| {
                let hit = FeatureHit::project(feature, ray.origin, direction);
                if hit.distance_to_ray_origin < params.min_distance
                    || hit.distance_to_ray_origin > params.max_distance
                {
                    return None;
                }

                // A feature sitting on the origin has no direction to compare
                let to_feature = (feature - ray.origin).try_normalize()?;
                let angle = direction.dot(to_feature).clamp(-1.0, 1.0).acos();
                (angle <= max_angle).then_some(hit)
            })
            .collect();

        hits.sort_by(|a, b| a.distance_to_ray_origin.total_cmp(&b.distance_to_ray_origin));
        hits.truncate(params.max_results);
        hits
    }

    /// The feature with the smallest perpendicular miss distance to the ray.
    ///
    /// No angle or range filter applies. Ties go to the earliest point in the cloud.
    pub fn closest(&self, ray: &Ray) -> Option<FeatureHit> {
        let direction = ray.unit_direction()?;
        self.points
            .iter()
            .map(|&feature| FeatureHit::project(feature, ray.origin, direction))
            .min_by(|a, b| {
                a.miss_distance
                    .partial_cmp(&b.miss_distance)
                    .unwrap_or(Ordering::Equal)
            })
    }
}
