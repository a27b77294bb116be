//! Augmented-reality placement and manipulation engine.
//!
//! Turns touch input plus a per-frame tracking snapshot (camera pose,
//! feature points, plane anchors) into world transforms for placed objects.
//!
//! - [`tracking`] - `ArFrame` resource written by the tracking backend
//! - [`geometry`] - rays, projection, feature point search, bounds
//! - [`placement`] - screen point to world position resolution
//! - [`objects`] - objects, registry, selection and lifecycle events
//! - [`gestures`] - pan and rotation handling
//! - [`config`] - persisted engine settings
//! - [`simulator`] - desktop tracking simulator used by the binary

pub mod config;
pub mod constants;
pub mod geometry;
pub mod gestures;
pub mod objects;
pub mod paths;
pub mod placement;
pub mod simulator;
pub mod tracking;

use bevy::prelude::*;

/// Config, objects and gestures. Tracking data comes from elsewhere.
pub struct ArPlacementPlugin;

impl Plugin for ArPlacementPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(config::ConfigPlugin)
            .add_plugins(objects::ObjectsPlugin)
            .add_plugins(gestures::GesturesPlugin);
    }
}
