//! Background loading of external model assets.
//!
//! File I/O runs on the [`IoTaskPool`]; the finished load is picked up by
//! [`poll_load_tasks`] on the main schedule, which is the only place the
//! object gets attached and registered.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;
use thiserror::Error;

use crate::constants::SUPPORTED_MODEL_EXTENSIONS;
use crate::tracking::ArFrame;

use super::messages::ObjectEvent;
use super::{ArObject, ModelScene, ObjectRegistry};

#[derive(Debug, Error)]
pub enum ObjectLoadError {
    #[error("model file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read model {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model file is empty: {}", .0.display())]
    Empty(PathBuf),
    #[error("unsupported model format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// In-flight model load attached to the object waiting for it
#[derive(Component)]
pub struct LoadObjectTask {
    pub task: Task<Result<ModelScene, ObjectLoadError>>,
    /// Registry generation when the load was dispatched
    pub generation: u64,
}

/// Read and validate a model file. Runs off the main thread.
pub fn load_model(path: &Path) -> Result<ModelScene, ObjectLoadError> {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_MODEL_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false);
    if !supported {
        return Err(ObjectLoadError::UnsupportedFormat(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ObjectLoadError::NotFound(path.to_path_buf())
        } else {
            ObjectLoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    if bytes.is_empty() {
        return Err(ObjectLoadError::Empty(path.to_path_buf()));
    }

    Ok(ModelScene {
        path: path.to_path_buf(),
        byte_len: bytes.len() as u64,
    })
}

/// Dispatch a model load for `path` on the IO task pool
pub fn spawn_load_task(path: PathBuf, generation: u64) -> LoadObjectTask {
    let task = IoTaskPool::get().spawn(async move { load_model(&path) });
    LoadObjectTask { task, generation }
}

/// Polls model loads and attaches finished objects
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadObjectTask, &mut ArObject)>,
    mut registry: ResMut<ObjectRegistry>,
    frame: Res<ArFrame>,
    mut events: MessageWriter<ObjectEvent>,
) {
    for (entity, mut task, mut object) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.task)) else {
            continue;
        };

        if task.generation != registry.generation() {
            debug!("Dropping stale model load for {:?}", entity);
            commands.entity(entity).despawn();
            continue;
        }

        let scene = match result {
            Ok(scene) => scene,
            Err(e) => {
                warn!("Cannot create object: {}", e);
                commands.entity(entity).despawn();
                continue;
            }
        };

        let Some(camera) = frame.camera.as_ref() else {
            warn!("Cannot create object {:?}: no camera pose", scene.path);
            commands.entity(entity).despawn();
            continue;
        };

        let position = object.position;
        object.set_position(position, camera);
        object.loading = false;
        info!("Loaded model {:?} ({} bytes)", scene.path, scene.byte_len);

        commands
            .entity(entity)
            .remove::<LoadObjectTask>()
            .insert((scene, Visibility::Inherited));
        registry.add(entity, object.name.clone());
        events.write(ObjectEvent::Created(entity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(&dir.path().join("absent.glb")).unwrap_err();
        assert!(matches!(err, ObjectLoadError::NotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, ObjectLoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.glb");
        std::fs::write(&path, b"").unwrap();
        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, ObjectLoadError::Empty(_)));
    }

    #[test]
    fn test_loads_model_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Chair.GLB");
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();
        let scene = load_model(&path).unwrap();
        assert_eq!(scene.byte_len, 4);
        assert_eq!(scene.path, path);
    }

    #[test]
    fn test_error_messages_name_the_file() {
        let err = ObjectLoadError::Empty(PathBuf::from("lamp.glb"));
        assert_eq!(err.to_string(), "model file is empty: lamp.glb");
    }
}
