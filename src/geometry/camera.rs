//! Camera pose snapshot and screen/world projection.
//!
//! Screen coordinates are in logical pixels with the origin at the top-left
//! corner of the viewport and Y growing downward. NDC follows glam's
//! right-handed convention with depth in `[0, 1]`.

use bevy::math::{Mat4, Vec2, Vec3};

/// A per-frame, read-only camera pose supplied by the tracking subsystem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    world_from_view: Mat4,
    clip_from_view: Mat4,
    viewport_size: Vec2,
}

impl CameraPose {
    pub fn new(world_from_view: Mat4, clip_from_view: Mat4, viewport_size: Vec2) -> Self {
        Self {
            world_from_view,
            clip_from_view,
            viewport_size,
        }
    }

    /// Perspective camera with a vertical field of view (radians)
    pub fn perspective(
        world_from_view: Mat4,
        fov_y: f32,
        viewport_size: Vec2,
        near: f32,
        far: f32,
    ) -> Self {
        let aspect = if viewport_size.y > 0.0 {
            viewport_size.x / viewport_size.y
        } else {
            1.0
        };
        Self::new(
            world_from_view,
            Mat4::perspective_rh(fov_y, aspect, near, far),
            viewport_size,
        )
    }

    /// Camera position in world space
    pub fn translation(&self) -> Vec3 {
        self.world_from_view.w_axis.truncate()
    }

    /// Project a world position to screen coordinates.
    ///
    /// Returns `None` when the point is on the camera plane (clip w of zero).
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.clip_from_view * self.world_from_view.inverse() * world.extend(1.0);
        if clip.w.abs() <= f32::EPSILON {
            return None;
        }
        let ndc = Vec2::new(clip.x, clip.y) / clip.w;
        Some(self.ndc_to_screen(ndc))
    }

    /// Unproject a screen point at the given NDC depth into world space
    pub fn unproject(&self, screen: Vec2, ndc_depth: f32) -> Option<Vec3> {
        if self.viewport_size.x <= 0.0 || self.viewport_size.y <= 0.0 {
            return None;
        }
        let ndc = self.screen_to_ndc(screen).extend(ndc_depth);
        let world_from_clip = self.world_from_view * self.clip_from_view.inverse();
        let world = world_from_clip.project_point3(ndc);
        world.is_finite().then_some(world)
    }

    fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.viewport_size.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport_size.y * 2.0,
        )
    }

    fn ndc_to_screen(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) / 2.0 * self.viewport_size.x,
            (1.0 - ndc.y) / 2.0 * self.viewport_size.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> CameraPose {
        CameraPose::perspective(
            Mat4::IDENTITY,
            60f32.to_radians(),
            Vec2::new(800.0, 600.0),
            0.1,
            100.0,
        )
    }

    #[test]
    fn test_translation_from_transform() {
        let pose = CameraPose::perspective(
            Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            1.0,
            Vec2::new(100.0, 100.0),
            0.1,
            10.0,
        );
        assert_eq!(pose.translation(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_screen_center_projects_forward() {
        let camera = test_camera();
        let screen = camera.project(Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert!((screen - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_project_unproject_round_trip_direction() {
        let camera = test_camera();
        let world = Vec3::new(0.7, -0.4, -3.0);
        let screen = camera.project(world).unwrap();
        let far = camera.unproject(screen, 1.0).unwrap();
        let expected = world.normalize();
        let actual = (far - camera.translation()).normalize();
        assert!((expected - actual).length() < 1e-3);
    }

    #[test]
    fn test_screen_y_grows_downward() {
        let camera = test_camera();
        let above = camera.project(Vec3::new(0.0, 1.0, -5.0)).unwrap();
        assert!(above.y < 300.0);
    }

    #[test]
    fn test_unproject_with_empty_viewport_is_none() {
        let camera = CameraPose::perspective(Mat4::IDENTITY, 1.0, Vec2::ZERO, 0.1, 10.0);
        assert!(camera.unproject(Vec2::ZERO, 1.0).is_none());
    }
}
