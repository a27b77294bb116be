//! World position resolution for placing and dragging objects.

mod resolver;

use bevy::prelude::*;

use crate::config::{EngineConfig, PlacementSettings};
use crate::tracking::ArFrame;

pub use resolver::{PlacementSource, WorldPlacement, resolve_world_position};

/// Most recent successful placement decision, for diagnostics
#[derive(Resource, Debug, Default)]
pub struct LastPlacement(pub Option<WorldPlacement>);

/// Placement tuning from the engine config, or the defaults without one
pub fn placement_settings(config: Option<&EngineConfig>) -> PlacementSettings {
    config.map(|c| *c.placement()).unwrap_or_default()
}

/// Resolve a screen point and remember the decision
pub fn resolve_and_record(
    frame: &ArFrame,
    settings: &PlacementSettings,
    last: &mut LastPlacement,
    screen: Vec2,
    existing: Option<Vec3>,
) -> Option<WorldPlacement> {
    let placement = resolve_world_position(frame, settings, screen, existing)?;
    debug!(
        "Resolved {:?} -> {:?} via {:?}",
        screen, placement.position, placement.source
    );
    last.0 = Some(placement);
    Some(placement)
}
