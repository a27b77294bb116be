//! Systems handling object requests, selection and transform sync.

use bevy::prelude::*;

use crate::tracking::ArFrame;

use super::hit_testing::object_at_touches;
use super::messages::{
    AddObjectRequest, CreateObjectRequest, DestroyObjectRequest, MoveObjectRequest, ObjectEvent,
    ResetRequest, TouchBegan, TouchEnded,
};
use super::params::ObjectSpawner;
use super::{ArObject, ObjectRegistry};

pub fn create_object_system(
    mut requests: MessageReader<CreateObjectRequest>,
    mut spawner: ObjectSpawner,
) {
    for request in requests.read() {
        let object = ArObject::new(
            request.source.clone(),
            request.name.clone(),
            request.capabilities.clone(),
        );
        if let Some(entity) = spawner.spawn(object, request.position, request.angle) {
            debug!("Created object {:?} ({:?})", entity, request.name);
        }
    }
}

/// Places a deep copy of the requested template
pub fn add_object_system(mut requests: MessageReader<AddObjectRequest>, mut spawner: ObjectSpawner) {
    for request in requests.read() {
        let object = request.template.instantiate();
        spawner.spawn(object, request.position, request.angle);
    }
}

pub fn move_object_system(
    mut requests: MessageReader<MoveObjectRequest>,
    registry: Res<ObjectRegistry>,
    frame: Res<ArFrame>,
    mut objects: Query<&mut ArObject>,
    mut events: MessageWriter<ObjectEvent>,
) {
    for request in requests.read() {
        let Some(camera) = frame.camera.as_ref() else {
            warn!("Cannot move object: no camera pose");
            continue;
        };
        if !registry.contains(request.entity) {
            continue;
        }
        let Ok(mut object) = objects.get_mut(request.entity) else {
            continue;
        };

        object.set_position(request.position, camera);
        events.write(ObjectEvent::Moved {
            entity: request.entity,
            position: object.position,
        });
    }
}

pub fn destroy_object_system(
    mut commands: Commands,
    mut requests: MessageReader<DestroyObjectRequest>,
    mut registry: ResMut<ObjectRegistry>,
    mut events: MessageWriter<ObjectEvent>,
) {
    for request in requests.read() {
        if !registry.remove(request.entity) {
            continue;
        }
        commands.entity(request.entity).despawn();
        events.write(ObjectEvent::Removed(request.entity));
    }
}

pub fn reset_system(
    mut commands: Commands,
    mut requests: MessageReader<ResetRequest>,
    mut registry: ResMut<ObjectRegistry>,
    mut events: MessageWriter<ObjectEvent>,
) {
    for _ in requests.read() {
        let removed = registry.remove_all();
        info!("Reset scene, removed {} objects", removed.len());
        for entity in removed {
            commands.entity(entity).despawn();
        }
        events.write(ObjectEvent::Reset);
    }
}

/// Selects the object under the touches, first touch wins
pub fn touch_began_system(
    mut touches: MessageReader<TouchBegan>,
    mut registry: ResMut<ObjectRegistry>,
    frame: Res<ArFrame>,
    objects: Query<&ArObject>,
    mut events: MessageWriter<ObjectEvent>,
) {
    for touch in touches.read() {
        let Some(camera) = frame.camera.as_ref() else {
            continue;
        };

        let candidates: Vec<(Entity, &ArObject)> = registry
            .iter()
            .filter_map(|o| objects.get(o.entity).ok().map(|object| (o.entity, object)))
            .collect();

        let Some(hit) = object_at_touches(camera, &touch.touches, &candidates) else {
            continue;
        };

        registry.select(Some(hit));
        events.write(ObjectEvent::Selected(hit));
    }
}

pub fn touch_ended_system(
    mut touches: MessageReader<TouchEnded>,
    mut registry: ResMut<ObjectRegistry>,
    mut events: MessageWriter<ObjectEvent>,
) {
    for _ in touches.read() {
        release_selection(&mut registry, &mut events);
    }
}

/// Clears the selection and notifies, if anything was selected
pub fn release_selection(registry: &mut ObjectRegistry, events: &mut MessageWriter<ObjectEvent>) {
    if let Some(selected) = registry.selected() {
        registry.select(None);
        events.write(ObjectEvent::Released(selected));
    }
}

/// Mirrors object position and angles into the scene-graph transform
pub fn sync_object_transforms(mut objects: Query<(&ArObject, &mut Transform), Changed<ArObject>>) {
    for (object, mut transform) in objects.iter_mut() {
        transform.translation = object.position;
        transform.rotation = object.rotation();
    }
}
