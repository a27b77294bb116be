//! Placed AR objects: creation, registry, selection and lifecycle events.
//!
//! ## Module Structure
//!
//! - [`object`] - `ArObject` component, templates and gesture capabilities
//! - [`shape`] - Procedural shape descriptors
//! - [`registry`] - `ObjectRegistry` resource (ordered objects + selection)
//! - [`hit_testing`] - Touch-to-object bounding box hit tests
//! - [`loading`] - Background model loading
//! - [`messages`] - Request and notification messages
//! - [`params`] - SystemParam bundles (spawning, distance queries)
//! - [`systems`] - Request handlers and transform sync
//!
//! Every mutation of the registry or an object writes exactly one
//! [`ObjectEvent`] from the same system that performed it.

pub mod hit_testing;
pub mod loading;
pub mod messages;
pub mod object;
pub mod params;
pub mod registry;
pub mod shape;
pub mod systems;


use bevy::prelude::*;

use crate::tracking::ArFrame;

pub use loading::{LoadObjectTask, ObjectLoadError};
pub use messages::{
    AddObjectRequest, CreateObjectRequest, DestroyObjectRequest, MoveObjectRequest, ObjectEvent,
    ResetRequest, TouchBegan, TouchEnded,
};
pub use object::{ArObject, Gesture, ModelScene, ObjectSource, ObjectTemplate, TemplateId};
pub use params::{ObjectSpawner, SceneQueries};
pub use registry::{ObjectRegistry, RegisteredObject};
pub use shape::{BodyKind, ShapeDescriptor, ShapeKind, ShapeProperties, ShapeSize};

/// Ordering of object systems within `Update`
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectSystems {
    /// Creation, removal, loading and selection
    Lifecycle,
    /// Mirror object state into `Transform`
    Sync,
}

pub struct ObjectsPlugin;

impl Plugin for ObjectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ObjectRegistry>()
            .init_resource::<ArFrame>()
            .add_message::<CreateObjectRequest>()
            .add_message::<AddObjectRequest>()
            .add_message::<MoveObjectRequest>()
            .add_message::<DestroyObjectRequest>()
            .add_message::<ResetRequest>()
            .add_message::<TouchBegan>()
            .add_message::<TouchEnded>()
            .add_message::<ObjectEvent>()
            .configure_sets(Update, ObjectSystems::Lifecycle.before(ObjectSystems::Sync))
            .add_systems(
                Update,
                (
                    systems::create_object_system,
                    systems::add_object_system,
                    loading::poll_load_tasks,
                    systems::move_object_system,
                    systems::destroy_object_system,
                    systems::reset_system,
                    systems::touch_began_system,
                    systems::touch_ended_system,
                )
                    .chain()
                    .in_set(ObjectSystems::Lifecycle),
            )
            .add_systems(
                Update,
                systems::sync_object_transforms.in_set(ObjectSystems::Sync),
            );
    }
}
