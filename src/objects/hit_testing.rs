//! Touch-to-object hit testing against object bounding boxes.

use bevy::prelude::*;

use crate::geometry::{CameraPose, Ray};

use super::ArObject;

/// Nearest object whose bounds the screen ray enters
pub fn object_at_screen(
    camera: &CameraPose,
    screen: Vec2,
    candidates: &[(Entity, &ArObject)],
) -> Option<Entity> {
    let ray = Ray::from_screen(camera, screen)?;
    candidates
        .iter()
        .filter_map(|(entity, object)| {
            object
                .bounds
                .ray_distance(&ray, object.position, object.rotation())
                .map(|distance| (*entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

/// Resolve the object under a set of active touches.
///
/// Touches are tried in order and the first one that hits wins. When none
/// hit, the centre of the touches is tried as a last resort.
pub fn object_at_touches(
    camera: &CameraPose,
    touches: &[Vec2],
    candidates: &[(Entity, &ArObject)],
) -> Option<Entity> {
    if let Some(hit) = touches
        .iter()
        .find_map(|&touch| object_at_screen(camera, touch, candidates))
    {
        return Some(hit);
    }

    if touches.len() < 2 {
        return None;
    }
    object_at_screen(camera, touch_centroid(touches)?, candidates)
}

/// Midpoint of the rectangle bounding all touches
pub fn touch_centroid(touches: &[Vec2]) -> Option<Vec2> {
    let first = *touches.first()?;
    let (min, max) = touches
        .iter()
        .fold((first, first), |(min, max), &t| (min.min(t), max.max(t)));
    Some((min + max) / 2.0)
}
