use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MODEL_HALF_EXTENT;
use crate::geometry::{BoundingBox, CameraPose};

use super::shape::ShapeDescriptor;

/// Gestures an object can be manipulated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    Pan,
    Rotation,
}

/// Where an object's geometry comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectSource {
    Shape(ShapeDescriptor),
    /// External 3D model, loaded in the background before attach
    Model { path: PathBuf },
}

impl ObjectSource {
    fn half_extents(&self) -> Vec3 {
        match self {
            ObjectSource::Shape(shape) => shape.half_extents(),
            ObjectSource::Model { .. } => Vec3::splat(DEFAULT_MODEL_HALF_EXTENT),
        }
    }
}

/// Identity of a reusable object template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateId(pub u64);

impl TemplateId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A reusable description that can back any number of placed objects.
///
/// Every placement instantiates its own copy, so instances never share state.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTemplate {
    pub id: TemplateId,
    pub name: Option<String>,
    pub source: ObjectSource,
    pub capabilities: HashSet<Gesture>,
}

impl ObjectTemplate {
    pub fn new(source: ObjectSource, name: Option<String>, capabilities: HashSet<Gesture>) -> Self {
        Self {
            id: TemplateId::next(),
            name,
            source,
            capabilities,
        }
    }

    /// A fresh, independent object backed by this template
    pub fn instantiate(&self) -> ArObject {
        let mut object = ArObject::new(self.source.clone(), self.name.clone(), self.capabilities.clone());
        object.template = Some(self.id);
        object
    }
}

/// A virtual object placed in the AR scene.
///
/// The entity carrying this component is the scene-graph node; the engine
/// mirrors `position`/`euler_angles` into the entity's [`Transform`].
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ArObject {
    pub name: Option<String>,
    pub position: Vec3,
    /// Pitch (x), yaw (y), roll (z) in radians
    pub euler_angles: Vec3,
    pub capabilities: HashSet<Gesture>,
    /// True while the model is loading in the background
    pub loading: bool,
    pub source: ObjectSource,
    /// Template this object was instantiated from, if any
    pub template: Option<TemplateId>,
    pub bounds: BoundingBox,
}

impl ArObject {
    pub fn new(source: ObjectSource, name: Option<String>, capabilities: HashSet<Gesture>) -> Self {
        let bounds = BoundingBox::new(source.half_extents());
        Self {
            name,
            position: Vec3::ZERO,
            euler_angles: Vec3::ZERO,
            capabilities,
            loading: false,
            source,
            template: None,
            bounds,
        }
    }

    pub fn from_shape(shape: ShapeDescriptor, name: Option<String>, capabilities: HashSet<Gesture>) -> Self {
        Self::new(ObjectSource::Shape(shape), name, capabilities)
    }

    pub fn allows(&self, gesture: Gesture) -> bool {
        self.capabilities.contains(&gesture)
    }

    /// Place the object at a world position, given the current camera pose.
    ///
    /// The camera parameter is kept for camera-relative placement, but the
    /// position is stored as an absolute world position: re-expressing it
    /// through the camera translation is an identity.
    pub fn set_position(&mut self, position: Vec3, _camera: &CameraPose) {
        self.position = position;
    }

    pub fn set_angle(&mut self, angle: Vec3) {
        self.euler_angles = angle;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.euler_angles.y,
            self.euler_angles.x,
            self.euler_angles.z,
        )
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: self.rotation(),
            scale: Vec3::ONE,
        }
    }
}

/// Sub-scene attached to a model object once its asset finished loading
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ModelScene {
    pub path: PathBuf,
    pub byte_len: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_camera() -> CameraPose {
        CameraPose::perspective(
            Mat4::from_translation(Vec3::new(0.3, 1.7, -0.9)),
            1.0,
            Vec2::new(640.0, 480.0),
            0.1,
            50.0,
        )
    }

    #[test]
    fn test_set_position_is_absolute() {
        let mut object = ArObject::from_shape(ShapeDescriptor::cube(0.1), None, HashSet::new());
        let target = Vec3::new(1.1, 0.0, -2.3);
        object.set_position(target, &offset_camera());
        // Bit-exact: no round trip through the camera translation
        assert_eq!(object.position, target);
    }

    #[test]
    fn test_template_instances_are_independent() {
        let template = ObjectTemplate::new(
            ObjectSource::Model {
                path: PathBuf::from("chair.glb"),
            },
            Some("chair".to_string()),
            HashSet::from([Gesture::Pan]),
        );

        let mut first = template.instantiate();
        let second = template.instantiate();
        first.position = Vec3::X;
        first.capabilities.insert(Gesture::Rotation);

        assert_eq!(first.template, Some(template.id));
        assert_eq!(second.template, Some(template.id));
        assert_eq!(second.position, Vec3::ZERO);
        assert!(!second.allows(Gesture::Rotation));
        assert!(!template.capabilities.contains(&Gesture::Rotation));
    }

    #[test]
    fn test_template_ids_are_unique() {
        let a = ObjectTemplate::new(ObjectSource::Shape(ShapeDescriptor::cube(0.1)), None, HashSet::new());
        let b = ObjectTemplate::new(ObjectSource::Shape(ShapeDescriptor::cube(0.1)), None, HashSet::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_yaw_only_rotation() {
        let mut object = ArObject::from_shape(ShapeDescriptor::cube(0.1), None, HashSet::new());
        object.set_angle(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        let forward = object.rotation() * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_model_bounds_default() {
        let object = ArObject::new(
            ObjectSource::Model {
                path: PathBuf::from("lamp.glb"),
            },
            None,
            HashSet::new(),
        );
        assert_eq!(object.bounds.half_extents, Vec3::splat(DEFAULT_MODEL_HALF_EXTENT));
    }
}
