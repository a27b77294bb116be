//! Maps mouse and keyboard input onto touch and gesture messages.
//!
//! - Left button: one touch; dragging while held is a pan
//! - Q / E while holding an object: rotate
//! - 1 / 2 / 3: place a cube, sphere or plane under the cursor
//! - Delete: destroy the object under the cursor
//! - R: reset the scene

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use bevy_egui::EguiContexts;

use crate::config::EngineConfig;
use crate::gestures::{GesturePhase, PanGesture, RotationGesture, ViewResized};
use crate::objects::hit_testing::object_at_screen;
use crate::objects::{
    ArObject, CreateObjectRequest, DestroyObjectRequest, ObjectRegistry, ObjectSource,
    ResetRequest, ShapeDescriptor, ShapeProperties, TouchBegan, TouchEnded,
};
use crate::placement::{LastPlacement, resolve_and_record};
use crate::tracking::ArFrame;

/// Radians per second applied while Q or E is held
const ROTATE_SPEED: f32 = 1.5;

/// Mouse button state treated as a single finger
#[derive(Resource, Debug, Default)]
pub struct PointerState {
    last: Option<Vec2>,
    panning: bool,
}

pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

pub fn mouse_touch_input(
    mut contexts: EguiContexts,
    mouse: Res<ButtonInput<MouseButton>>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerState>,
    mut touch_began: MessageWriter<TouchBegan>,
    mut touch_ended: MessageWriter<TouchEnded>,
    mut pan: MessageWriter<PanGesture>,
) {
    let cursor = window.single().ok().and_then(|w| w.cursor_position());

    if mouse.just_pressed(MouseButton::Left) && !is_cursor_over_ui(&mut contexts) {
        if let Some(cursor) = cursor {
            pointer.last = Some(cursor);
            pointer.panning = false;
            touch_began.write(TouchBegan {
                touches: vec![cursor],
            });
        }
        return;
    }

    let Some(last) = pointer.last else {
        return;
    };

    if mouse.just_released(MouseButton::Left) {
        if pointer.panning {
            pan.write(PanGesture {
                phase: GesturePhase::Ended,
                translation: Vec2::ZERO,
            });
        } else {
            touch_ended.write(TouchEnded);
        }
        *pointer = PointerState::default();
        return;
    }

    if let Some(cursor) = cursor
        && cursor != last
    {
        if !pointer.panning {
            pointer.panning = true;
            pan.write(PanGesture {
                phase: GesturePhase::Began,
                translation: Vec2::ZERO,
            });
        }
        pan.write(PanGesture {
            phase: GesturePhase::Changed,
            translation: cursor - last,
        });
        pointer.last = Some(cursor);
    }
}

pub fn keyboard_rotation_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut rotation: MessageWriter<RotationGesture>,
) {
    let mut direction = 0.0;
    if keyboard.pressed(KeyCode::KeyQ) {
        direction -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        direction += 1.0;
    }
    if direction != 0.0 {
        rotation.write(RotationGesture {
            phase: GesturePhase::Changed,
            rotation: direction * ROTATE_SPEED * time.delta_secs(),
        });
    }
}

#[allow(clippy::too_many_arguments)]
pub fn keyboard_scene_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    window: Query<&Window, With<PrimaryWindow>>,
    frame: Res<ArFrame>,
    config: Res<EngineConfig>,
    registry: Res<ObjectRegistry>,
    objects: Query<&ArObject>,
    mut last: ResMut<LastPlacement>,
    mut create: MessageWriter<CreateObjectRequest>,
    mut destroy: MessageWriter<DestroyObjectRequest>,
    mut reset: MessageWriter<ResetRequest>,
) {
    let Ok(window) = window.single() else {
        return;
    };
    let screen = window
        .cursor_position()
        .unwrap_or_else(|| window.size() / 2.0);

    let shape = if keyboard.just_pressed(KeyCode::Digit1) {
        Some(("cube", ShapeDescriptor::cube(0.2), [0.9, 0.3, 0.2, 1.0]))
    } else if keyboard.just_pressed(KeyCode::Digit2) {
        Some(("sphere", ShapeDescriptor::sphere(0.1), [0.2, 0.4, 0.9, 1.0]))
    } else if keyboard.just_pressed(KeyCode::Digit3) {
        Some(("plane", ShapeDescriptor::plane(0.4, 0.4), [0.3, 0.8, 0.3, 1.0]))
    } else {
        None
    };

    if let Some((name, shape, color)) = shape {
        let shape = shape.with_properties(ShapeProperties {
            color,
            ..default()
        });
        let settings = config.placement();
        match resolve_and_record(&frame, settings, &mut last, screen, None) {
            Some(placement) => {
                create.write(CreateObjectRequest {
                    source: ObjectSource::Shape(shape),
                    name: Some(format!("{}-{}", name, registry.len() + 1)),
                    position: placement.position,
                    angle: Vec3::ZERO,
                    capabilities: config.data.simulator.spawn_gestures.clone(),
                });
            }
            None => warn!("Nothing to place the {} on", name),
        }
    }

    if keyboard.just_pressed(KeyCode::Delete)
        && let Some(camera) = frame.camera.as_ref()
    {
        let candidates: Vec<(Entity, &ArObject)> = registry
            .iter()
            .filter_map(|o| objects.get(o.entity).ok().map(|object| (o.entity, object)))
            .collect();
        if let Some(entity) = object_at_screen(camera, screen, &candidates) {
            destroy.write(DestroyObjectRequest { entity });
        }
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        reset.write(ResetRequest);
    }
}

pub fn forward_window_resize(
    mut resized: MessageReader<WindowResized>,
    mut view: MessageWriter<ViewResized>,
) {
    for event in resized.read() {
        view.write(ViewResized {
            size: Vec2::new(event.width, event.height),
        });
    }
}
