//! Desktop stand-in for an AR device.
//!
//! A 3D camera plays the tracked device, a seeded point cloud plays the
//! feature points, and a bounded floor plays the detected plane anchor.
//! Mouse and keyboard input become touch and gesture messages.

pub mod camera;
pub mod input;
pub mod panel;
pub mod scene;
pub mod tracking;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigLoaded;
use crate::objects::ObjectSystems;

pub use camera::SimulatorCamera;
pub use tracking::SyntheticFeatures;

/// Tracking data is published before anything reads it
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackingUpdated;

pub struct SimulatorPlugin;

impl Plugin for SimulatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SyntheticFeatures>()
            .init_resource::<input::PointerState>()
            .add_systems(Startup, camera::spawn_camera.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    (camera::camera_look, camera::camera_move),
                    tracking::regenerate_features,
                    tracking::update_ar_frame,
                )
                    .chain()
                    .in_set(TrackingUpdated),
            )
            .add_systems(
                Update,
                (
                    input::forward_window_resize,
                    input::mouse_touch_input,
                    input::keyboard_rotation_input,
                    input::keyboard_scene_input,
                )
                    .after(TrackingUpdated)
                    .before(ObjectSystems::Lifecycle),
            )
            .add_systems(
                Update,
                (
                    scene::attach_object_meshes,
                    scene::draw_selection,
                    scene::draw_tracking,
                )
                    .after(ObjectSystems::Sync),
            )
            .add_systems(EguiPrimaryContextPass, panel::scene_panel_ui);
    }
}
