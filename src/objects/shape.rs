//! Procedural shape descriptors (cube, sphere, plane) with physical properties.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::PLANE_SHAPE_HEIGHT;

/// How a physics backend should treat the object's body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    Static,
    #[default]
    Dynamic,
    Kinematic,
}

/// Box dimensions shared by all shapes (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeSize {
    pub width: f32,
    pub height: f32,
    pub length: f32,
    /// Chamfer radius for boxes
    pub round: f32,
}

/// Material and physical properties of a procedural shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeProperties {
    /// Diffuse colour as linear RGBA
    pub color: [f32; 4],
    pub body: BodyKind,
    /// Restitution of the physics body
    pub bounce: f32,
}

impl Default for ShapeProperties {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            body: BodyKind::Dynamic,
            bounce: 1.0,
        }
    }
}

/// A procedural shape an object can be created from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Cube { size: f32, round: f32 },
    Sphere { radius: f32 },
    Plane { width: f32, length: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    pub properties: ShapeProperties,
}

impl ShapeDescriptor {
    pub fn cube(size: f32) -> Self {
        Self {
            kind: ShapeKind::Cube { size, round: 0.0 },
            properties: ShapeProperties::default(),
        }
    }

    pub fn sphere(radius: f32) -> Self {
        Self {
            kind: ShapeKind::Sphere { radius },
            properties: ShapeProperties::default(),
        }
    }

    pub fn plane(width: f32, length: f32) -> Self {
        Self {
            kind: ShapeKind::Plane { width, length },
            properties: ShapeProperties::default(),
        }
    }

    pub fn with_properties(mut self, properties: ShapeProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Box dimensions. Planes are thin boxes; spheres round to half their radius.
    pub fn size(&self) -> ShapeSize {
        match self.kind {
            ShapeKind::Cube { size, round } => ShapeSize {
                width: size,
                height: size,
                length: size,
                round,
            },
            ShapeKind::Sphere { radius } => ShapeSize {
                width: radius,
                height: radius,
                length: radius,
                round: radius / 2.0,
            },
            ShapeKind::Plane { width, length } => ShapeSize {
                width,
                height: PLANE_SHAPE_HEIGHT,
                length,
                round: 0.0,
            },
        }
    }

    /// Local half-extents of the shape's bounding box
    pub fn half_extents(&self) -> Vec3 {
        match self.kind {
            ShapeKind::Sphere { radius } => Vec3::splat(radius),
            _ => {
                let size = self.size();
                Vec3::new(size.width, size.height, size.length) / 2.0
            }
        }
    }
}
