//! Per-frame snapshot of the external AR tracking subsystem.
//!
//! The tracking backend (ARKit/ARCore bridge, simulator, test fixture) writes
//! [`ArFrame`] once per rendered frame. Everything downstream only reads it.

use bevy::prelude::*;

use crate::geometry::{CameraPose, ConeSearch, FeatureHit, FeaturePointMatcher, Ray};

/// Opaque handle to a plane anchor owned by the tracking backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(pub u64);

/// A hit against a detected plane, as reported by the tracking backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneHit {
    pub position: Vec3,
    pub anchor: AnchorId,
}

/// Plane-anchor hit test for a screen point (existing planes, within extent)
pub trait PlaneHitTest: Send + Sync + 'static {
    fn hit_test(&self, screen: Vec2) -> Option<PlaneHit>;
}

impl<F> PlaneHitTest for F
where
    F: Fn(Vec2) -> Option<PlaneHit> + Send + Sync + 'static,
{
    fn hit_test(&self, screen: Vec2) -> Option<PlaneHit> {
        self(screen)
    }
}

/// Backend with no plane detection
pub struct NoPlanes;

impl PlaneHitTest for NoPlanes {
    fn hit_test(&self, _screen: Vec2) -> Option<PlaneHit> {
        None
    }
}

/// Resource holding the latest tracking data
#[derive(Resource)]
pub struct ArFrame {
    /// `None` until tracking is initialized
    pub camera: Option<CameraPose>,
    /// Raw feature points for this frame
    pub feature_points: Vec<Vec3>,
    pub planes: Box<dyn PlaneHitTest>,
}

impl Default for ArFrame {
    fn default() -> Self {
        Self {
            camera: None,
            feature_points: Vec::new(),
            planes: Box::new(NoPlanes),
        }
    }
}

impl ArFrame {
    pub fn new(camera: Option<CameraPose>, feature_points: Vec<Vec3>) -> Self {
        Self {
            camera,
            feature_points,
            planes: Box::new(NoPlanes),
        }
    }

    pub fn with_planes(mut self, planes: impl PlaneHitTest) -> Self {
        self.planes = Box::new(planes);
        self
    }

    /// World ray through a screen point; `None` without a camera pose
    pub fn ray_from_screen(&self, screen: Vec2) -> Option<Ray> {
        let camera = self.camera.as_ref()?;
        Ray::from_screen(camera, screen)
    }

    pub fn hit_test_planes(&self, screen: Vec2) -> Option<PlaneHit> {
        self.planes.hit_test(screen)
    }

    pub fn features(&self) -> FeaturePointMatcher<'_> {
        FeaturePointMatcher::new(&self.feature_points)
    }

    /// Filtered feature search from a screen point
    pub fn hit_test_features(&self, screen: Vec2, params: &ConeSearch) -> Vec<FeatureHit> {
        match self.ray_from_screen(screen) {
            Some(ray) => self.features().search(&ray, params),
            None => Vec::new(),
        }
    }

    /// Unrestricted closest-miss feature search from a screen point
    pub fn closest_feature(&self, screen: Vec2) -> Option<FeatureHit> {
        let ray = self.ray_from_screen(screen)?;
        self.features().closest(&ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracked_frame(points: Vec<Vec3>) -> ArFrame {
        let camera = CameraPose::perspective(
            Mat4::IDENTITY,
            60f32.to_radians(),
            Vec2::new(800.0, 600.0),
            0.1,
            100.0,
        );
        ArFrame::new(Some(camera), points)
    }

    #[test]
    fn test_default_frame_is_untracked() {
        let frame = ArFrame::default();
        assert!(frame.camera.is_none());
        assert!(frame.ray_from_screen(Vec2::ZERO).is_none());
        assert!(frame.hit_test_planes(Vec2::ZERO).is_none());
    }

    #[test]
    fn test_ray_direction_is_unit_length() {
        let frame = tracked_frame(Vec::new());
        for screen in [
            Vec2::new(0.0, 0.0),
            Vec2::new(400.0, 300.0),
            Vec2::new(799.0, 17.0),
            Vec2::new(123.0, 599.0),
        ] {
            let ray = frame.ray_from_screen(screen).unwrap();
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
            assert_eq!(ray.origin, Vec3::ZERO);
        }
    }

    #[test]
    fn test_screen_center_ray_points_forward() {
        let frame = tracked_frame(Vec::new());
        let ray = frame.ray_from_screen(Vec2::new(400.0, 300.0)).unwrap();
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_feature_queries_without_camera_are_empty() {
        let frame = ArFrame::new(None, vec![Vec3::new(0.0, 0.0, -1.0)]);
        assert!(frame
            .hit_test_features(Vec2::ZERO, &ConeSearch::default())
            .is_empty());
        assert!(frame.closest_feature(Vec2::ZERO).is_none());
    }

    #[test]
    fn test_closure_plane_backend() {
        let frame = ArFrame::default().with_planes(|screen: Vec2| {
            Some(PlaneHit {
                position: screen.extend(0.0),
                anchor: AnchorId(7),
            })
        });
        let hit = frame.hit_test_planes(Vec2::new(1.0, 2.0)).unwrap();
        assert_eq!(hit.anchor, AnchorId(7));
        assert_eq!(hit.position, Vec3::new(1.0, 2.0, 0.0));
    }
}
