//! Message types for object lifecycle requests and notifications.

use std::collections::HashSet;

use bevy::prelude::*;

use super::{Gesture, ObjectSource, ObjectTemplate};

/// Request to create a new object from a shape or an external model
#[derive(Message, Debug, Clone)]
pub struct CreateObjectRequest {
    pub source: ObjectSource,
    pub name: Option<String>,
    pub position: Vec3,
    /// Euler angles in radians
    pub angle: Vec3,
    pub capabilities: HashSet<Gesture>,
}

/// Request to place a fresh copy of a reusable template
#[derive(Message, Debug, Clone)]
pub struct AddObjectRequest {
    pub template: ObjectTemplate,
    pub position: Vec3,
    pub angle: Vec3,
}

/// Request to move a registered object to a world position
#[derive(Message, Debug, Clone, Copy)]
pub struct MoveObjectRequest {
    pub entity: Entity,
    pub position: Vec3,
}

/// Request to remove and despawn a registered object
#[derive(Message, Debug, Clone, Copy)]
pub struct DestroyObjectRequest {
    pub entity: Entity,
}

/// Request to remove every object
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ResetRequest;

/// One or more fingers touched down, in screen coordinates
#[derive(Message, Debug, Clone, Default)]
pub struct TouchBegan {
    pub touches: Vec<Vec2>,
}

/// All fingers lifted
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct TouchEnded;

/// Lifecycle notification, written once per state change in mutation order
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum ObjectEvent {
    Created(Entity),
    Removed(Entity),
    Reset,
    Selected(Entity),
    Released(Entity),
    Moved { entity: Entity, position: Vec3 },
    Rotated { entity: Entity, angle: Vec3 },
}
