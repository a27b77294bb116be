//! Screen point to world position resolution.
//!
//! Sources are tried in a fixed priority order and the first success wins:
//!
//! 1. Plane anchor hit from the tracking backend
//! 2. Feature point cone search along the screen ray
//! 3. Infinite horizontal plane at the existing object height (only when the
//!    cone search found nothing and the ray points down enough)
//! 4. The cone search hit from step 2
//! 5. Unrestricted closest-miss feature point
//!
//! If nothing resolves, the caller must leave the object untouched.

use bevy::prelude::*;

use crate::config::PlacementSettings;
use crate::tracking::{AnchorId, ArFrame};

/// Which source produced a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementSource {
    PlaneAnchor,
    FeatureCone,
    InfinitePlane,
    ClosestFeature,
}

/// A resolved world position for a screen point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPlacement {
    pub position: Vec3,
    pub plane_anchor: Option<AnchorId>,
    pub is_on_plane: bool,
    pub source: PlacementSource,
}

impl WorldPlacement {
    fn on_plane(position: Vec3, plane_anchor: Option<AnchorId>, source: PlacementSource) -> Self {
        Self {
            position,
            plane_anchor,
            is_on_plane: true,
            source,
        }
    }

    fn off_plane(position: Vec3, source: PlacementSource) -> Self {
        Self {
            position,
            plane_anchor: None,
            is_on_plane: false,
            source,
        }
    }
}

/// Resolve `screen` to a world position.
///
/// `existing` is the current position of the object being moved, if any;
/// its height defines the fallback horizontal plane.
pub fn resolve_world_position(
    frame: &ArFrame,
    settings: &PlacementSettings,
    screen: Vec2,
    existing: Option<Vec3>,
) -> Option<WorldPlacement> {
    if let Some(hit) = frame.hit_test_planes(screen) {
        return Some(WorldPlacement::on_plane(
            hit.position,
            Some(hit.anchor),
            PlacementSource::PlaneAnchor,
        ));
    }

    let ray = frame.ray_from_screen(screen)?;
    let features = frame.features();
    let cone_hit = features
        .search(&ray, &settings.cone_search())
        .into_iter()
        .next();

    if cone_hit.is_none()
        && let Some(existing) = existing
    {
        let facing_down = ray
            .unit_direction()
            .is_some_and(|direction| direction.y <= settings.horizon_threshold);
        if facing_down && let Some(position) = ray.intersect_horizontal_plane(existing.y) {
            return Some(WorldPlacement::on_plane(
                position,
                None,
                PlacementSource::InfinitePlane,
            ));
        }
    }

    if let Some(hit) = cone_hit {
        return Some(WorldPlacement::off_plane(hit.position, PlacementSource::FeatureCone));
    }

    features
        .closest(&ray)
        .map(|hit| WorldPlacement::off_plane(hit.position, PlacementSource::ClosestFeature))
}
