//! Pan and rotation gestures applied to the selected object.
//!
//! - [`controller`] - `GestureController` pan tracking and yaw rotation
//! - [`messages`] - Gesture input messages
//! - [`systems`] - Message handlers

pub mod controller;
pub mod messages;
pub mod systems;


use bevy::prelude::*;

use crate::objects::{ObjectSystems, ObjectsPlugin};
use crate::placement::LastPlacement;

pub use controller::{GestureController, PanState};
pub use messages::{GesturePhase, PanGesture, RotationGesture, ViewResized};

pub struct GesturesPlugin;

impl Plugin for GesturesPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<ObjectsPlugin>() {
            app.add_plugins(ObjectsPlugin);
        }

        app.init_resource::<GestureController>()
            .init_resource::<LastPlacement>()
            .add_message::<PanGesture>()
            .add_message::<RotationGesture>()
            .add_message::<ViewResized>()
            .add_systems(
                Update,
                (
                    systems::view_resized_system,
                    systems::pan_gesture_system,
                    systems::rotation_gesture_system,
                )
                    .chain()
                    .after(ObjectSystems::Lifecycle)
                    .before(ObjectSystems::Sync),
            );
    }
}
