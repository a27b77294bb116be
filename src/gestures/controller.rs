//! Per-gesture state turning incremental touch deltas into object motion.

use bevy::prelude::*;

use crate::config::PlacementSettings;
use crate::geometry::CameraPose;
use crate::objects::ArObject;
use crate::placement::{LastPlacement, resolve_and_record};
use crate::tracking::ArFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanState {
    #[default]
    Idle,
    Panning,
}

/// Owns the running screen position of a pan.
///
/// Gesture deltas are incremental; the controller keeps the total. The
/// tracked position survives the end of a pan so the next one resumes from
/// it, and is dropped only by [`GestureController::invalidate`] or when a
/// different object starts being panned.
#[derive(Resource, Debug, Default)]
pub struct GestureController {
    state: PanState,
    tracked_screen_position: Option<Vec2>,
    tracked_entity: Option<Entity>,
}

impl GestureController {
    pub fn state(&self) -> PanState {
        self.state
    }

    pub fn tracked_screen_position(&self) -> Option<Vec2> {
        self.tracked_screen_position
    }

    /// Forget the tracked position (view geometry changed)
    pub fn invalidate(&mut self) {
        self.tracked_screen_position = None;
        self.tracked_entity = None;
    }

    /// Pan ended or was cancelled. Tracking is kept.
    pub fn end_pan(&mut self) {
        self.state = PanState::Idle;
    }

    /// Add a pan delta for `entity` and return the new screen position.
    ///
    /// The first delta starts from the object's projected position.
    pub fn advance(
        &mut self,
        entity: Entity,
        camera: &CameraPose,
        object_position: Vec3,
        delta: Vec2,
    ) -> Option<Vec2> {
        if self.tracked_entity != Some(entity) {
            self.invalidate();
        }

        let start = match self.tracked_screen_position {
            Some(tracked) => tracked,
            None => camera.project(object_position)?,
        };
        let tracked = start + delta;

        self.tracked_screen_position = Some(tracked);
        self.tracked_entity = Some(entity);
        self.state = PanState::Panning;
        Some(tracked)
    }

    /// Apply one pan delta to `object`. Returns the new position if it moved.
    #[allow(clippy::too_many_arguments)]
    pub fn pan(
        &mut self,
        entity: Entity,
        object: &mut ArObject,
        frame: &ArFrame,
        camera: &CameraPose,
        settings: &PlacementSettings,
        last: &mut LastPlacement,
        delta: Vec2,
    ) -> Option<Vec3> {
        let screen = self.advance(entity, camera, object.position, delta)?;
        let placement = resolve_and_record(frame, settings, last, screen, Some(object.position))?;
        object.set_position(placement.position, camera);
        Some(object.position)
    }
}

/// Apply one rotation delta to the object's yaw. Returns the new angles.
pub fn rotate_yaw(object: &mut ArObject, rotation: f32) -> Vec3 {
    let mut angle = object.euler_angles;
    angle.y -= rotation;
    object.set_angle(angle);
    angle
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::objects::ShapeDescriptor;

    fn ortho_camera() -> CameraPose {
        // 100 px per meter, screen centre on the Z axis
        CameraPose::new(
            Mat4::IDENTITY,
            Mat4::orthographic_rh(-4.0, 4.0, -3.0, 3.0, 0.1, 100.0),
            Vec2::new(800.0, 600.0),
        )
    }

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn test_first_delta_starts_from_projection() {
        let e = entities(1);
        let mut controller = GestureController::default();
        assert_eq!(controller.state(), PanState::Idle);

        let screen = controller
            .advance(e[0], &ortho_camera(), Vec3::new(1.0, 0.0, -2.0), Vec2::new(10.0, 0.0))
            .unwrap();
        assert!((screen - Vec2::new(510.0, 300.0)).length() < 1e-3);
        assert_eq!(controller.state(), PanState::Panning);
    }

    #[test]
    fn test_deltas_accumulate() {
        let e = entities(1);
        let mut controller = GestureController::default();
        let camera = ortho_camera();
        controller.advance(e[0], &camera, Vec3::ZERO, Vec2::new(5.0, 5.0));
        // Object position is ignored once tracking exists
        let screen = controller
            .advance(e[0], &camera, Vec3::new(3.0, 0.0, -1.0), Vec2::new(5.0, -2.0))
            .unwrap();
        assert!((screen - Vec2::new(410.0, 303.0)).length() < 1e-3);
    }

    #[test]
    fn test_end_keeps_tracking_invalidate_drops_it() {
        let e = entities(1);
        let mut controller = GestureController::default();
        controller.advance(e[0], &ortho_camera(), Vec3::ZERO, Vec2::ONE);

        controller.end_pan();
        assert_eq!(controller.state(), PanState::Idle);
        assert!(controller.tracked_screen_position().is_some());

        controller.invalidate();
        assert!(controller.tracked_screen_position().is_none());
    }

    #[test]
    fn test_other_entity_restarts_tracking() {
        let e = entities(2);
        let mut controller = GestureController::default();
        let camera = ortho_camera();
        controller.advance(e[0], &camera, Vec3::ZERO, Vec2::new(50.0, 0.0));

        let screen = controller
            .advance(e[1], &camera, Vec3::new(-1.0, 0.0, -2.0), Vec2::ZERO)
            .unwrap();
        assert!((screen - Vec2::new(300.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_rotation_only_touches_yaw() {
        let mut object = ArObject::from_shape(ShapeDescriptor::cube(0.1), None, HashSet::new());
        object.set_angle(Vec3::new(0.1, 0.0, 0.2));

        rotate_yaw(&mut object, 0.5);
        let angle = rotate_yaw(&mut object, 0.25);

        assert_eq!(angle, Vec3::new(0.1, -0.75, 0.2));
        assert_eq!(object.euler_angles, angle);
    }
}
