//! Gesture message handlers.

use bevy::prelude::*;

use crate::config::EngineConfig;
use crate::objects::systems::release_selection;
use crate::objects::{ArObject, Gesture, ObjectEvent, ObjectRegistry};
use crate::placement::{LastPlacement, placement_settings};
use crate::tracking::ArFrame;

use super::controller::{GestureController, rotate_yaw};
use super::messages::{GesturePhase, PanGesture, RotationGesture, ViewResized};

/// Selected object allowed to take `gesture`, if any
fn manipulable(
    registry: &ObjectRegistry,
    objects: &Query<&mut ArObject>,
    gesture: Gesture,
) -> Option<Entity> {
    let entity = registry.selected()?;
    let object = objects.get(entity).ok()?;
    object.allows(gesture).then_some(entity)
}

#[allow(clippy::too_many_arguments)]
pub fn pan_gesture_system(
    mut gestures: MessageReader<PanGesture>,
    mut controller: ResMut<GestureController>,
    mut registry: ResMut<ObjectRegistry>,
    frame: Res<ArFrame>,
    config: Option<Res<EngineConfig>>,
    mut last: ResMut<LastPlacement>,
    mut objects: Query<&mut ArObject>,
    mut events: MessageWriter<ObjectEvent>,
) {
    let settings = placement_settings(config.as_deref());

    for gesture in gestures.read() {
        match gesture.phase {
            GesturePhase::Began => {}
            GesturePhase::Ended | GesturePhase::Cancelled => {
                controller.end_pan();
                release_selection(&mut registry, &mut events);
            }
            GesturePhase::Changed => {
                let Some(entity) = manipulable(&registry, &objects, Gesture::Pan) else {
                    continue;
                };
                let Some(camera) = frame.camera.as_ref() else {
                    warn!("Cannot pan object: no camera pose");
                    continue;
                };
                let Ok(mut object) = objects.get_mut(entity) else {
                    continue;
                };

                if let Some(position) = controller.pan(
                    entity,
                    &mut object,
                    &frame,
                    camera,
                    &settings,
                    &mut last,
                    gesture.translation,
                ) {
                    events.write(ObjectEvent::Moved { entity, position });
                }
            }
        }
    }
}

pub fn rotation_gesture_system(
    mut gestures: MessageReader<RotationGesture>,
    registry: Res<ObjectRegistry>,
    frame: Res<ArFrame>,
    mut objects: Query<&mut ArObject>,
    mut events: MessageWriter<ObjectEvent>,
) {
    for gesture in gestures.read() {
        if gesture.phase != GesturePhase::Changed {
            continue;
        }
        let Some(entity) = manipulable(&registry, &objects, Gesture::Rotation) else {
            continue;
        };
        if frame.camera.is_none() {
            warn!("Cannot rotate object: no camera pose");
            continue;
        }
        let Ok(mut object) = objects.get_mut(entity) else {
            continue;
        };

        let angle = rotate_yaw(&mut object, gesture.rotation);
        events.write(ObjectEvent::Rotated { entity, angle });
    }
}

pub fn view_resized_system(
    mut resized: MessageReader<ViewResized>,
    mut controller: ResMut<GestureController>,
) {
    for event in resized.read() {
        debug!("View resized to {:?}, dropping pan tracking", event.size);
        controller.invalidate();
    }
}
