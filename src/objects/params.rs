//! SystemParam bundles shared by object systems.
//!
//! - [`ObjectSpawner`]: creates objects and attaches them to the registry
//! - [`SceneQueries`]: read-only distance queries between camera and objects

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::tracking::ArFrame;

use super::loading::spawn_load_task;
use super::messages::ObjectEvent;
use super::{ArObject, ObjectRegistry, ObjectSource};

/// Everything needed to put a new object into the scene
#[derive(SystemParam)]
pub struct ObjectSpawner<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub registry: ResMut<'w, ObjectRegistry>,
    pub frame: Res<'w, ArFrame>,
    pub events: MessageWriter<'w, ObjectEvent>,
}

impl ObjectSpawner<'_, '_> {
    /// Spawn `object` at `position` with `angle`.
    ///
    /// Shapes are attached and registered right away. Models are spawned
    /// hidden with a background load and registered once it completes.
    /// Returns `None` (with a warning) when there is no camera pose.
    pub fn spawn(&mut self, mut object: ArObject, position: Vec3, angle: Vec3) -> Option<Entity> {
        let Some(camera) = self.frame.camera.as_ref() else {
            warn!("Cannot create object: no camera pose");
            return None;
        };

        object.set_position(position, camera);
        object.set_angle(angle);

        if let ObjectSource::Model { path } = &object.source {
            let task = spawn_load_task(path.clone(), self.registry.generation());
            object.loading = true;
            let entity = self
                .commands
                .spawn((object.transform(), Visibility::Hidden, object, task))
                .id();
            debug!("Loading model for {:?}", entity);
            return Some(entity);
        }

        let name = object.name.clone();
        let entity = self
            .commands
            .spawn((object.transform(), Visibility::Inherited, object))
            .id();
        self.registry.add(entity, name);
        self.events.write(ObjectEvent::Created(entity));
        Some(entity)
    }
}

/// Camera and object positions for distance queries
#[derive(SystemParam)]
pub struct SceneQueries<'w, 's> {
    pub frame: Res<'w, ArFrame>,
    pub registry: Res<'w, ObjectRegistry>,
    pub objects: Query<'w, 's, &'static ArObject>,
}

impl SceneQueries<'_, '_> {
    /// Vector from a registered object to the camera
    pub fn distance_from_camera(&self, entity: Entity) -> Option<Vec3> {
        let Some(camera) = self.frame.camera.as_ref() else {
            warn!("Cannot measure distance: no camera pose");
            return None;
        };
        let object = self.registered(entity)?;
        Some(camera.translation() - object.position)
    }

    /// Vector from object `a` to object `b`
    pub fn distance_between(&self, a: Entity, b: Entity) -> Option<Vec3> {
        let a = self.registered(a)?;
        let b = self.registered(b)?;
        Some(b.position - a.position)
    }

    fn registered(&self, entity: Entity) -> Option<&ArObject> {
        if !self.registry.contains(entity) {
            return None;
        }
        self.objects.get(entity).ok()
    }
}
